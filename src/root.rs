//! Project root discovery
//!
//! Walks from a starting directory through its ancestors looking for a root
//! marker (`.git` or `.config`). The first directory carrying one is the
//! project root; without a marker the start directory itself is used, but
//! override-file discovery is allowed to keep walking to the filesystem
//! root (see `env::discover`).

use std::path::{Path, PathBuf};

/// Directory entries that mark a project root, checked in each ancestor.
pub const ROOT_MARKERS: &[&str] = &[".git", ".config"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    /// The resolved root directory.
    pub path: PathBuf,
    /// Whether a marker was found, or the start directory was the fallback.
    pub marker_found: bool,
}

impl ProjectRoot {
    /// Find the project root for `start` (the directory itself counts as its
    /// own first ancestor).
    pub fn discover(start: &Path) -> ProjectRoot {
        let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
        for dir in start.ancestors() {
            if has_marker(dir) {
                tracing::debug!("project root {} (marker)", dir.display());
                return ProjectRoot { path: dir.to_path_buf(), marker_found: true };
            }
        }
        tracing::debug!("no root marker above {}, using it as root", start.display());
        ProjectRoot { path: start, marker_found: false }
    }
}

fn has_marker(dir: &Path) -> bool {
    ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_finds_marker_in_ancestor() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join(".git")).expect("marker");
        let nested = tmp.path().join("a/b/c");
        fs::create_dir_all(&nested).expect("nested");

        let root = ProjectRoot::discover(&nested);
        assert!(root.marker_found);
        assert_eq!(root.path, tmp.path().canonicalize().expect("canon"));
    }

    #[test]
    fn test_discover_prefers_nearest_marker() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join(".git")).expect("outer marker");
        let inner = tmp.path().join("svc");
        fs::create_dir_all(inner.join(".config")).expect("inner marker");

        let root = ProjectRoot::discover(&inner);
        assert!(root.marker_found);
        assert_eq!(root.path, inner.canonicalize().expect("canon"));
    }

    #[test]
    fn test_discover_falls_back_to_start() {
        let tmp = TempDir::new().expect("tmp");
        let nested = tmp.path().join("deep");
        fs::create_dir_all(&nested).expect("nested");

        let root = ProjectRoot::discover(&nested);
        // Temp dirs normally sit under marker-free system paths; if some
        // ancestor happens to carry a marker the fallback branch is moot.
        if !root.marker_found {
            assert_eq!(root.path, nested.canonicalize().expect("canon"));
        }
    }
}
