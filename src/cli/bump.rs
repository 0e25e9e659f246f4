//! Bump command implementation

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

use crate::root::ProjectRoot;
use crate::version::{bump_at_root, BumpKind};

#[derive(Args)]
pub struct BumpArgs {
    /// Which segment to bump
    #[arg(value_enum, value_name = "KIND")]
    pub kind: BumpKind,

    /// Optional prerelease label to attach (e.g. 'rc.1')
    #[arg(long = "pre", value_name = "LABEL")]
    pub prerelease: Option<String>,

    /// Compute and print the new version without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Directory whose project root holds the version files
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}

pub fn run(args: BumpArgs) -> Result<()> {
    let root = ProjectRoot::discover(&args.path);
    let outcome = bump_at_root(&root.path, args.kind, args.prerelease.as_deref(), args.dry_run)?;

    if args.dry_run {
        println!(
            "{} would set version {} -> {}",
            style("dry-run:").yellow().bold(),
            outcome.previous,
            outcome.next
        );
    } else {
        println!("{} {} -> {}", style("version bumped").green(), outcome.previous, outcome.next);
    }

    Ok(())
}
