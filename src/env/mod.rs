//! Override-file discovery and environment merging
//!
//! Collects `*.env` files between a working directory and the project root
//! boundary, merges them shallowest-first (so the deepest file wins per
//! key), then overlays the process environment on top with highest
//! precedence.

pub mod discover;
pub mod merge;
pub mod parse;

pub use discover::discover_env_files;
pub use merge::{merge_env_files, resolve, MergedEnvironment};
pub use parse::{parse_env_file, EnvFile};
