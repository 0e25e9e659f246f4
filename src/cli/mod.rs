//! Command-line interface for envfold
//!
//! Provides `inspect`, `export`, `info`, and `bump` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod bump;
mod export;
mod info;
mod inspect;

/// Layered .env discovery, resolved project settings, and version bumping
#[derive(Parser)]
#[command(name = "envfold")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved settings as pretty JSON
    Inspect(inspect::InspectArgs),

    /// Print the merged environment as shell export statements
    Export(export::ExportArgs),

    /// Show project root, version, and git metadata
    Info(info::InfoArgs),

    /// Bump the semantic version in Cargo.toml and src/lib.rs
    Bump(bump::BumpArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Inspect(args) => inspect::run(args),
        Commands::Export(args) => export::run(args),
        Commands::Info(args) => info::run(args),
        Commands::Bump(args) => bump::run(args),
    }
}
