//! Export command implementation
//!
//! Prints the merged environment as shell-compatible `export KEY="VALUE"`
//! lines. Values are JSON-quoted, which covers spaces, quotes, and
//! backslashes for POSIX shells.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::env;

#[derive(Args)]
pub struct ExportArgs {
    /// Directory to resolve the environment from
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let merged = env::resolve(&args.path);
    for (key, value) in merged.iter() {
        println!("export {}={}", key, json!(value));
    }
    Ok(())
}
