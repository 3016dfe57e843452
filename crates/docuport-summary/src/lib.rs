//! SUMMARY.md hierarchy parsing for docuport.
//!
//! This crate turns a GitBook-style table of contents into an ordered,
//! validated list of [`HierarchyEntry`] values. Each matching line of the
//! form `- [Title](path/to/file.md)` contributes one entry carrying its
//! nesting depth, source filename, display title, and position (the 1-based
//! line number in the summary document). Non-matching lines are ignored.
//!
//! The only way to obtain a [`Summary`] is through [`SummaryParser::parse`]
//! or [`Summary::from_entries`], both of which enforce the nesting
//! invariants, so downstream consumers never see a malformed hierarchy.
//!
//! # Example
//!
//! ```
//! use docuport_summary::SummaryParser;
//!
//! let parser = SummaryParser::new();
//! let summary = parser
//!     .parse("- [Intro](intro.md)\n- [Guide](guide.md)\n  - [Setup](setup.md)\n")
//!     .unwrap();
//!
//! assert_eq!(summary.entries().len(), 3);
//! assert!(summary.entries()[1].has_children);
//! ```

use std::path::Path;

use regex::Regex;

/// Default number of whitespace characters per nesting level.
pub const DEFAULT_INDENT_STEP: usize = 2;

/// Error raised for summaries that violate the nesting invariants.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// Indentation is not an exact multiple of the configured step.
    #[error("line {line}: indentation of {indent} is not a multiple of {step}")]
    UnevenIndent {
        /// 1-based line number of the offending entry.
        line: usize,
        /// Leading whitespace character count.
        indent: usize,
        /// Configured indent step.
        step: usize,
    },

    /// The first entry of the document is nested below the root.
    #[error("line {line}: first entry must not be indented")]
    IndentedFirstEntry {
        /// 1-based line number of the offending entry.
        line: usize,
    },

    /// An entry is nested more than one level below its predecessor.
    #[error("line {line}: entry skips from depth {from} to depth {to}")]
    LevelJump {
        /// 1-based line number of the offending entry.
        line: usize,
        /// Depth of the preceding entry.
        from: usize,
        /// Depth of the offending entry.
        to: usize,
    },

    /// The indent step is zero.
    #[error("indent step must be greater than zero")]
    ZeroStep,
}

/// One parsed line of the summary document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyEntry {
    /// Nesting depth (leading whitespace count divided by the indent step).
    pub level: usize,
    /// Base name of the linked file, e.g. `"intro.md"`. Case preserved.
    pub filename: String,
    /// Trimmed bracket text.
    pub title: String,
    /// 1-based line number among all lines of the document.
    pub position: usize,
    /// Whether the next entry in document order is nested below this one.
    /// Derived during construction; any caller-supplied value is replaced.
    pub has_children: bool,
}

/// Validated, ordered hierarchy extracted from a summary document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    entries: Vec<HierarchyEntry>,
}

impl Summary {
    /// Build a summary from pre-constructed entries.
    ///
    /// Validates the nesting invariants (first entry at depth 0, no entry
    /// more than one level below its predecessor) and derives
    /// [`HierarchyEntry::has_children`] for every entry, overwriting
    /// whatever the caller supplied.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::IndentedFirstEntry`] or
    /// [`SummaryError::LevelJump`] when an invariant is violated.
    pub fn from_entries(mut entries: Vec<HierarchyEntry>) -> Result<Self, SummaryError> {
        if let Some(first) = entries.first()
            && first.level > 0
        {
            return Err(SummaryError::IndentedFirstEntry {
                line: first.position,
            });
        }

        for pair in entries.windows(2) {
            if pair[1].level > pair[0].level + 1 {
                return Err(SummaryError::LevelJump {
                    line: pair[1].position,
                    from: pair[0].level,
                    to: pair[1].level,
                });
            }
        }

        let next_levels: Vec<Option<usize>> = (0..entries.len())
            .map(|i| entries.get(i + 1).map(|next| next.level))
            .collect();
        for (entry, next_level) in entries.iter_mut().zip(next_levels) {
            entry.has_children = next_level.is_some_and(|next| next > entry.level);
        }

        Ok(Self { entries })
    }

    /// Entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[HierarchyEntry] {
        &self.entries
    }

    /// Whether the document contained no matching lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parser for GitBook-style summary documents.
///
/// Owns the compiled line pattern and the indent step. A line matches when
/// it consists of optional leading whitespace, a `- ` list marker, and a
/// markdown link whose target ends in `.md`. Everything else is skipped
/// silently; a document with zero matching lines parses to an empty
/// [`Summary`].
#[derive(Debug)]
pub struct SummaryParser {
    entry_regex: Regex,
    indent_step: usize,
}

impl SummaryParser {
    /// Create a parser with the default indent step of two.
    ///
    /// # Panics
    ///
    /// Panics if the internal line regex fails to compile. This should
    /// never happen as the pattern is a compile-time constant.
    #[must_use]
    pub fn new() -> Self {
        Self::with_indent_step(DEFAULT_INDENT_STEP).expect("default indent step is non-zero")
    }

    /// Create a parser with a custom indent step.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::ZeroStep`] if `indent_step` is zero.
    pub fn with_indent_step(indent_step: usize) -> Result<Self, SummaryError> {
        if indent_step == 0 {
            return Err(SummaryError::ZeroStep);
        }
        Ok(Self {
            entry_regex: Regex::new(r"^(\s*)- \[(.*?)\]\((.*\.md)\)")
                .expect("entry regex must compile"),
            indent_step,
        })
    }

    /// Parse a summary document into a validated hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError`] when a matched line has indentation that is
    /// not a multiple of the step, or when the nesting invariants are
    /// violated.
    pub fn parse(&self, content: &str) -> Result<Summary, SummaryError> {
        let mut entries = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let position = index + 1;
            let Some(caps) = self.entry_regex.captures(line) else {
                continue;
            };

            let indent = caps[1].chars().count();
            if indent % self.indent_step != 0 {
                return Err(SummaryError::UnevenIndent {
                    line: position,
                    indent,
                    step: self.indent_step,
                });
            }

            entries.push(HierarchyEntry {
                level: indent / self.indent_step,
                filename: link_target_filename(&caps[3]),
                title: caps[2].trim().to_owned(),
                position,
                has_children: false,
            });
        }

        Summary::from_entries(entries)
    }
}

impl Default for SummaryParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Base name of a link target, surrounding whitespace trimmed.
///
/// Targets without a final path component (e.g. a trailing slash) yield an
/// empty filename; such entries are never locatable and get skipped during
/// the build.
fn link_target_filename(target: &str) -> String {
    Path::new(target.trim())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
