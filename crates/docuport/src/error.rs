//! CLI error types.

use std::path::PathBuf;

use docuport_build::BuildError;
use docuport_config::ConfigError;
use docuport_summary::SummaryError;

/// CLI error type.
///
/// Each tier carries a distinct exit code so callers can tell a missing
/// input (2) from a malformed hierarchy (3) or a filesystem failure (4).
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("malformed summary: {0}")]
    Summary(#[from] SummaryError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Exit code for this error's tier.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 1,
            Self::InputNotFound(_) => 2,
            Self::Summary(_) => 3,
            Self::Build(_) | Self::Io(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_tier() {
        let not_found = CliError::InputNotFound(PathBuf::from("SUMMARY.md"));
        let malformed = CliError::Summary(SummaryError::IndentedFirstEntry { line: 1 });
        let io = CliError::Io(std::io::Error::other("disk"));

        assert_eq!(not_found.exit_code(), 2);
        assert_eq!(malformed.exit_code(), 3);
        assert_eq!(io.exit_code(), 4);
    }
}
