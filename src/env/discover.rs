//! Override-file discovery
//!
//! Walks from the starting directory through its ancestors, collecting
//! every `*.env` file per directory. The walk stops at the first ancestor
//! carrying a root marker; with no marker anywhere it runs to the
//! filesystem root. Results come back shallowest directory first, so a
//! merge in list order lets deeper files win.

use globset::{Glob, GlobMatcher};
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::root::ROOT_MARKERS;

// `*` matches the empty string, so a bare `.env` is covered too.
static ENV_FILE_PATTERN: Lazy<GlobMatcher> =
    Lazy::new(|| Glob::new("*.env").expect("valid glob").compile_matcher());

/// Collect override files between `start` and the root boundary, shallowest
/// directory first. Within one directory files come in name order.
pub fn discover_env_files(start: &Path) -> Vec<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

    let mut layers: Vec<Vec<PathBuf>> = Vec::new();
    for dir in start.ancestors() {
        layers.push(env_files_in(dir));
        let is_boundary = ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists());
        if is_boundary {
            break;
        }
    }

    // Ancestors iterate deepest-first; flip so the shallowest layer leads.
    layers.reverse();
    layers.into_iter().flatten().collect()
}

fn env_files_in(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!("cannot list {}: {}", dir.display(), err);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.file_name().is_some_and(|name| ENV_FILE_PATTERN.is_match(name)))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "").expect("write");
    }

    #[test]
    fn test_discover_orders_shallowest_first() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join(".git")).expect("marker");
        let svc = tmp.path().join("svc");
        fs::create_dir(&svc).expect("svc");
        touch(&tmp.path().join(".env"));
        touch(&svc.join(".env"));

        let files = discover_env_files(&svc);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.parent().expect("parent").file_name().expect("name").to_owned())
            .collect();
        assert_eq!(files.len(), 2);
        assert_eq!(names.last().expect("last").to_str(), Some("svc"));
    }

    #[test]
    fn test_discover_stops_at_marker_directory() {
        let tmp = TempDir::new().expect("tmp");
        touch(&tmp.path().join("outer.env"));
        let root = tmp.path().join("proj");
        fs::create_dir_all(root.join(".git")).expect("marker");
        touch(&root.join(".env"));
        let leaf = root.join("svc");
        fs::create_dir(&leaf).expect("leaf");

        let files = discover_env_files(&leaf);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("proj/.env"));
    }

    #[test]
    fn test_discover_name_order_within_directory() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join(".git")).expect("marker");
        touch(&tmp.path().join("b.env"));
        touch(&tmp.path().join("a.env"));
        touch(&tmp.path().join(".env"));

        let files = discover_env_files(tmp.path());
        let names: Vec<_> =
            files.iter().filter_map(|p| p.file_name()).filter_map(|n| n.to_str()).collect();
        assert_eq!(names, vec![".env", "a.env", "b.env"]);
    }

    #[test]
    fn test_discover_ignores_non_env_files_and_dirs() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join(".git")).expect("marker");
        touch(&tmp.path().join("notes.txt"));
        fs::create_dir(tmp.path().join("sub.env")).expect("dir with env suffix");

        assert!(discover_env_files(tmp.path()).is_empty());
    }
}
