//! `docuport convert` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use docuport_build::{SourceLocator, TreeBuilder, render_tree};
use docuport_config::{CliSettings, Config};
use docuport_summary::SummaryParser;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Book identifier under the books directory.
    book: String,

    /// Path to the summary document (bypasses the books directory layout).
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Books directory (overrides config).
    #[arg(long)]
    books_dir: Option<PathBuf>,

    /// Output directory root (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Source search directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Whitespace characters per nesting level (overrides config).
    #[arg(long)]
    indent_step: Option<usize>,

    /// Suppress directory tree printing.
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (default: auto-discover docuport.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the summary document is
    /// missing or malformed, or materialization hits a filesystem failure.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            books_dir: self.books_dir,
            output_dir: self.output_dir,
            search_dir: self.source_dir,
            indent_step: self.indent_step,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let summary_path = self
            .summary
            .unwrap_or_else(|| config.books_resolved.summary_path(&self.book));
        if !summary_path.exists() {
            return Err(CliError::InputNotFound(summary_path));
        }
        let content = fs::read_to_string(&summary_path)?;

        let parser = SummaryParser::with_indent_step(config.books_resolved.indent_step)?;
        let summary = parser.parse(&content)?;

        let book_dir = config.docs_resolved.book_output_dir(&self.book);
        fs::create_dir_all(&book_dir)?;

        output.info(&format!("Summary: {}", summary_path.display()));
        output.info(&format!("Output: {}", book_dir.display()));

        if !self.quiet {
            output.info("Initial directory tree:");
            output.info(&render_tree(&book_dir)?);
        }

        let locator = SourceLocator::new(config.docs_resolved.search_dir.clone())
            .exclude(config.docs_resolved.output_dir.clone());
        let builder = TreeBuilder::new(book_dir.clone(), locator);
        let report = builder.build(&summary)?;

        for filename in &report.skipped {
            output.warning(&format!(
                "Warning: '{filename}' not found in source directory, skipped"
            ));
        }

        if !self.quiet {
            output.info("Final directory tree:");
            output.info(&render_tree(&book_dir)?);
        }

        output.success(&format!(
            "Converted {} pages ({} categories, {} skipped) to {}",
            report.pages,
            report.categories,
            report.skipped.len(),
            book_dir.display()
        ));
        Ok(())
    }
}
