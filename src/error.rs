//! Structured error taxonomy
//!
//! Fatal conditions carry the offending path or value so callers can report
//! exactly what failed and where. Non-fatal conditions (unreadable override
//! file, malformed `.env` line) never surface here; they are skipped and
//! logged at the point of discovery.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The manifest's version field is not valid SemVer.
    #[error("'{value}' is not a valid semantic version")]
    InvalidVersion { value: String },

    /// The requested bump kind is not major, minor, or patch.
    #[error("unknown bump kind '{value}', expected 'major', 'minor', or 'patch'")]
    UnknownBumpKind { value: String },

    /// A supplied prerelease label is empty or has an empty dot-separated token.
    #[error("invalid prerelease label '{value}': expected non-empty dot-separated tokens")]
    InvalidPrerelease { value: String },

    /// The manifest exists but carries no version field under its package metadata.
    #[error("no version field found in {}", path.display())]
    VersionFieldMissing { path: PathBuf },

    /// A file the bump needs does not exist.
    #[error("{} not found", path.display())]
    TargetMissing { path: PathBuf },

    /// Reading or writing a bump target failed.
    #[error("failed to {op} {}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest was already rewritten when the metadata write failed.
    /// The two targets now disagree; the caller must surface recovery steps.
    #[error(
        "failed to write {}; {} was already updated and the two files now disagree",
        metadata.display(),
        manifest.display()
    )]
    Inconsistent {
        manifest: PathBuf,
        metadata: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be parsed as TOML at all.
    #[error("invalid manifest {}: {message}", path.display())]
    InvalidManifest { path: PathBuf, message: String },

    /// A settings fragment failed to contribute its fields.
    #[error("settings fragment '{name}' failed: {message}")]
    Fragment { name: String, message: String },

    /// The resolved settings could not be serialized for the snapshot.
    #[error("failed to serialize settings snapshot: {source}")]
    Snapshot {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
