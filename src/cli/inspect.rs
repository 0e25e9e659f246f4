//! Inspect command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::settings::Settings;

#[derive(Args)]
pub struct InspectArgs {
    /// Directory to resolve settings from
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Also write the resolved settings to <root>/.config/envfold.json
    #[arg(long)]
    pub snapshot: bool,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let settings = Settings::resolve(&args.path)
        .with_context(|| format!("failed to resolve settings from {}", args.path.display()))?;

    println!("{}", serde_json::to_string_pretty(&settings)?);

    if args.snapshot {
        let path = settings.write_snapshot()?;
        eprintln!("snapshot written to {}", path.display());
    }

    Ok(())
}
