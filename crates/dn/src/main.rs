//! docnav CLI - section-aware documentation navigation.
//!
//! Provides commands for:
//! - `check`: Build the navigation and report problems
//! - `resolve`: Print the sidebar and top navigation for a path as JSON
//! - `tree`: Print every section sidebar
//! - `expand`: Render widget embeds in an HTML file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExpandArgs, ResolveArgs, TreeArgs};
use output::Output;

/// docnav - section-aware documentation navigation.
#[derive(Parser)]
#[command(name = "dn", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the navigation and report errors and warnings.
    Check(CheckArgs),
    /// Resolve the navigation for a route path.
    Resolve(ResolveArgs),
    /// Print every section sidebar.
    Tree(TreeArgs),
    /// Expand widget embeds in an HTML file.
    Expand(ExpandArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Check(args) => args.common.verbose,
            Self::Resolve(args) => args.common.verbose,
            Self::Tree(args) => args.common.verbose,
            Self::Expand(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
        Commands::Expand(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
