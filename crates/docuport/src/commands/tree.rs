//! `docuport tree` command implementation.

use std::path::PathBuf;

use clap::Args;
use docuport_build::render_tree;
use docuport_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Book identifier under the output directory.
    book: String,

    /// Output directory root (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (default: auto-discover docuport.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the book has no generated
    /// tree.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let book_dir = config.docs_resolved.book_output_dir(&self.book);
        if !book_dir.is_dir() {
            return Err(CliError::InputNotFound(book_dir));
        }

        output.info(&format!("{}/", book_dir.display()));
        output.info(&render_tree(&book_dir)?);
        Ok(())
    }
}
