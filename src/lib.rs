//! envfold: layered environment discovery and project settings
//!
//! Walks from a working directory to the project root collecting `.env`
//! override files, merges them (deepest wins) under the process environment,
//! and exposes the result as a settings value with project/version/git
//! metadata attached. Also ships a semantic-version bumper that keeps the
//! manifest and the package version constant in sync.

pub mod cli;
pub mod env;
pub mod error;
pub mod git;
pub mod root;
pub mod settings;
pub mod version;

pub use error::Error;

pub const VERSION: &str = "0.2.0";
