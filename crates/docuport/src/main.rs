//! docuport CLI - GitBook to Docusaurus converter.
//!
//! Provides commands for:
//! - `convert`: materialize a book's summary hierarchy into a docs tree
//! - `tree`: print the generated tree for a book

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, TreeArgs};
use output::Output;

/// docuport - GitBook to Docusaurus converter.
#[derive(Parser)]
#[command(name = "docuport", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a book's summary document into a documentation tree.
    Convert(ConvertArgs),
    /// Print the generated documentation tree for a book.
    Tree(TreeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Convert(args) => args.verbose,
        Commands::Tree(args) => args.verbose,
    };

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(err.exit_code());
    }
}
