use std::path::{Path, PathBuf};

use crate::{FileChange, FileStatus, GitError, Result};

use super::Repository;

impl Repository {
    /// Lists the files a single commit touched, compared with its parent.
    ///
    /// A root commit is compared with the empty tree. A merge commit reports no
    /// files, matching `git diff-tree` without `-m`, `-c` or `--cc`. Renames are
    /// not detected, so a moved file shows up as a deletion plus an addition.
    /// Paths are relative to `scope`; files outside `scope` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommitNotFound`] if the commit cannot be resolved,
    /// [`GitError::OutsideRepository`] if `scope` is not inside the working
    /// directory, or a git error if the trees cannot be diffed.
    pub fn changed_files_in_commit(&self, refspec: &str, scope: &Path) -> Result<Vec<FileChange>> {
        let prefix = self.scope_prefix(scope)?;
        let commit = self.resolve_commit(refspec)?;
        if commit.parent_count() > 1 {
            return Ok(Vec::new());
        }
        let tree = commit.tree()?;

        let parent_tree = if commit.parent_count() == 1 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let diff = self
            .inner
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let mut changes = Vec::new();

        for delta in diff.deltas() {
            let status = match delta.status() {
                git2::Delta::Added => FileStatus::Added,
                git2::Delta::Deleted => FileStatus::Deleted,
                git2::Delta::Modified | git2::Delta::Typechange => FileStatus::Modified,
                _ => continue,
            };

            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .ok_or(GitError::MissingDeltaPath)?;

            if let Some(relative) = strip_scope(path, &prefix) {
                changes.push(FileChange::new(relative, status));
            }
        }

        Ok(changes)
    }
}

fn strip_scope(path: &Path, prefix: &Path) -> Option<PathBuf> {
    path.strip_prefix(prefix).ok().map(Path::to_path_buf)
}
