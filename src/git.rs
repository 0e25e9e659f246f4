//! Best-effort git metadata
//!
//! A missing repository, detached HEAD, or unborn branch never fails
//! settings construction; the fields just stay empty.

use git2::Repository;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize)]
pub struct GitMetadata {
    pub commit: Option<String>,
    pub branch: Option<String>,
}

/// Look up the short HEAD commit id and branch name at `root`.
pub fn discover(root: &Path) -> GitMetadata {
    let repo = match Repository::discover(root) {
        Ok(repo) => repo,
        Err(err) => {
            tracing::debug!("no git repository at {}: {}", root.display(), err);
            return GitMetadata::default();
        }
    };

    let mut metadata = GitMetadata::default();
    if let Ok(head) = repo.head() {
        if let Ok(commit) = head.peel_to_commit() {
            let id = commit.id().to_string();
            metadata.commit = Some(id[..8.min(id.len())].to_string());
        }
        if head.is_branch() {
            metadata.branch = head.shorthand().map(str::to_string);
        }
    }
    metadata
}
