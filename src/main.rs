//! envfold binary entry point

use anyhow::Result;

fn main() -> Result<()> {
    envfold::cli::run()
}
