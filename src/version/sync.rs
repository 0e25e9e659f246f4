//! Two-file version synchronization
//!
//! Reads the current version from the manifest (`Cargo.toml`), computes the
//! bumped version, and rewrites both the manifest field and the package's
//! `VERSION` constant. Both new file contents are computed in memory before
//! either write, so a parse or substitution failure touches nothing; a
//! metadata write failure after the manifest write is reported as an
//! inconsistent state naming both paths.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::{BumpKind, Version};

static MANIFEST_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^version\s*=\s*"[^"]*""#).expect("valid regex"));

static METADATA_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^pub const VERSION: &str = "[^"]*";"#).expect("valid regex"));

/// Outcome of a bump: what the manifest held and what was (or would be) written.
#[derive(Debug, Clone)]
pub struct BumpOutcome {
    pub previous: Version,
    pub next: Version,
}

pub struct VersionSynchronizer {
    manifest: PathBuf,
    metadata: PathBuf,
}

impl VersionSynchronizer {
    pub fn new(manifest: PathBuf, metadata: PathBuf) -> VersionSynchronizer {
        VersionSynchronizer { manifest, metadata }
    }

    /// The default targets under a project root: `Cargo.toml` and
    /// `src/lib.rs`. Both must exist.
    pub fn at_project_root(root: &Path) -> Result<VersionSynchronizer> {
        let manifest = root.join("Cargo.toml");
        if !manifest.exists() {
            return Err(Error::TargetMissing { path: manifest });
        }
        let metadata = root.join("src").join("lib.rs");
        if !metadata.exists() {
            return Err(Error::TargetMissing { path: metadata });
        }
        Ok(VersionSynchronizer::new(manifest, metadata))
    }

    /// Read the version field from the manifest: `[package].version`, or
    /// `[workspace.package].version` for virtual manifests.
    pub fn current_version(&self) -> Result<Version> {
        let text = read(&self.manifest)?;
        manifest_version(&self.manifest, &text)
    }

    /// Bump and persist. With `dry_run` the new version is computed and
    /// returned without writing either file. Each target is read exactly
    /// once; the parsed version and the rewritten text come from the same
    /// manifest snapshot.
    pub fn bump(
        &self,
        kind: BumpKind,
        prerelease: Option<&str>,
        dry_run: bool,
    ) -> Result<BumpOutcome> {
        let manifest_text = read(&self.manifest)?;
        let metadata_text = read(&self.metadata)?;

        let previous = manifest_version(&self.manifest, &manifest_text)?;
        let next = previous.bump(kind, prerelease)?;

        let new_manifest = rewritten_manifest(&self.manifest, &manifest_text, &next)?;
        let new_metadata = rewritten_metadata(&metadata_text, &next);

        if !dry_run {
            fs::write(&self.manifest, new_manifest).map_err(|source| Error::Io {
                op: "write",
                path: self.manifest.clone(),
                source,
            })?;
            fs::write(&self.metadata, new_metadata).map_err(|source| Error::Inconsistent {
                manifest: self.manifest.clone(),
                metadata: self.metadata.clone(),
                source,
            })?;
            tracing::info!("version {} -> {}", previous, next);
        }

        Ok(BumpOutcome { previous, next })
    }
}

/// Parse the version field out of already-read manifest text.
fn manifest_version(path: &Path, text: &str) -> Result<Version> {
    let doc: toml::Value = toml::from_str(text).map_err(|err| Error::InvalidManifest {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let field = doc
        .get("package")
        .and_then(|pkg| pkg.get("version"))
        .or_else(|| {
            doc.get("workspace").and_then(|ws| ws.get("package")).and_then(|p| p.get("version"))
        })
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::VersionFieldMissing { path: path.to_path_buf() })?;

    field.parse()
}

/// New manifest text with only the first version assignment replaced.
fn rewritten_manifest(path: &Path, text: &str, next: &Version) -> Result<String> {
    if !MANIFEST_VERSION_RE.is_match(text) {
        return Err(Error::VersionFieldMissing { path: path.to_path_buf() });
    }
    Ok(MANIFEST_VERSION_RE.replacen(text, 1, format!("version = \"{next}\"")).into_owned())
}

/// New metadata text: replace the VERSION constant, or insert one at the
/// top when the file has none.
fn rewritten_metadata(text: &str, next: &Version) -> String {
    let assignment = format!("pub const VERSION: &str = \"{next}\";");
    if METADATA_VERSION_RE.is_match(text) {
        METADATA_VERSION_RE.replacen(text, 1, assignment).into_owned()
    } else {
        format!("{assignment}\n{text}")
    }
}

/// Convenience wrapper: bump the default targets under `root`.
pub fn bump_at_root(
    root: &Path,
    kind: BumpKind,
    prerelease: Option<&str>,
    dry_run: bool,
) -> Result<BumpOutcome> {
    VersionSynchronizer::at_project_root(root)?.bump(kind, prerelease, dry_run)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io { op: "read", path: path.to_path_buf(), source })
}
