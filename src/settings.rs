//! Settings assembly
//!
//! One explicit resolution pass: discover the project root, merge the
//! override files under the process environment, attach package and git
//! metadata, then let registered fragments contribute extra fields. The
//! result is a plain value the caller passes around; there is no implicit
//! global instance.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::env::{self, MergedEnvironment};
use crate::error::{Error, Result};
use crate::git;
use crate::root::ProjectRoot;
use crate::version::VersionSynchronizer;

/// A composable contributor of extra settings fields, applied in
/// registration order at construction time. Later fragments override
/// earlier ones per key.
pub trait SettingsFragment {
    fn name(&self) -> &str;

    /// Produce this fragment's fields from the resolved environment.
    fn contribute(&self, env: &MergedEnvironment) -> std::result::Result<Map<String, Value>, String>;
}

#[derive(Debug, Serialize)]
pub struct Settings {
    pub project_root: PathBuf,
    pub package_version: Option<String>,
    pub git_commit: Option<String>,
    pub git_branch: Option<String>,
    pub env: MergedEnvironment,
    pub extra: Map<String, Value>,
}

impl Settings {
    /// Resolve settings for `start` with no fragments.
    pub fn resolve(start: &Path) -> Result<Settings> {
        Settings::init(start, &[])
    }

    /// Full resolution pass: env merge, metadata, then fragments.
    pub fn init(start: &Path, fragments: &[Box<dyn SettingsFragment>]) -> Result<Settings> {
        let root = ProjectRoot::discover(start);
        let env = env::resolve(start);
        let git = git::discover(&root.path);

        // Only the manifest read matters here; a project without the bump
        // targets still gets its version field surfaced when present.
        let manifest = root.path.join("Cargo.toml");
        let metadata = root.path.join("src").join("lib.rs");
        let package_version = VersionSynchronizer::new(manifest, metadata)
            .current_version()
            .map(|version| version.to_string())
            .ok();

        let mut extra = Map::new();
        for fragment in fragments {
            let fields = fragment.contribute(&env).map_err(|message| Error::Fragment {
                name: fragment.name().to_string(),
                message,
            })?;
            extra.extend(fields);
        }

        Ok(Settings {
            project_root: root.path,
            package_version,
            git_commit: git.commit,
            git_branch: git.branch,
            env,
            extra,
        })
    }

    /// Write the resolved settings as pretty JSON to
    /// `<root>/.config/envfold.json`, creating the directory if needed.
    /// Returns the snapshot path.
    pub fn write_snapshot(&self) -> Result<PathBuf> {
        let dir = self.project_root.join(".config");
        fs::create_dir_all(&dir).map_err(|source| Error::Io {
            op: "create",
            path: dir.clone(),
            source,
        })?;

        let path = dir.join("envfold.json");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|source| Error::Io {
            op: "write",
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
