use std::path::Path;

use changeset_git::{CommitInfo, FileChange};

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// Returns the commit HEAD points at, or `None` for a repository without commits.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or HEAD cannot be read.
    fn latest_commit(&self, project_root: &Path) -> Result<Option<CommitInfo>>;

    /// Lists the files `sha` touched, relative to `project_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or diff fails.
    fn changed_files_in_commit(&self, project_root: &Path, sha: &str) -> Result<Vec<FileChange>>;
}

impl<T: GitProvider + ?Sized> GitProvider for &T {
    fn latest_commit(&self, project_root: &Path) -> Result<Option<CommitInfo>> {
        (**self).latest_commit(project_root)
    }

    fn changed_files_in_commit(&self, project_root: &Path, sha: &str) -> Result<Vec<FileChange>> {
        (**self).changed_files_in_commit(project_root, sha)
    }
}
