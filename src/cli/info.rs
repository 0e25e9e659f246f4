//! Info command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use crate::settings::Settings;

#[derive(Args)]
pub struct InfoArgs {
    /// Directory to resolve settings from
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let settings = Settings::resolve(&args.path)
        .with_context(|| format!("failed to resolve settings from {}", args.path.display()))?;

    let line = |label: &str, value: Option<&str>| {
        println!("{:>16}  {}", style(label).bold(), value.unwrap_or("-"));
    };

    line("project root", settings.project_root.to_str());
    line("version", settings.package_version.as_deref());
    line("git commit", settings.git_commit.as_deref());
    line("git branch", settings.git_branch.as_deref());
    println!("{:>16}  {}", style("env entries").bold(), settings.env.len());

    Ok(())
}
