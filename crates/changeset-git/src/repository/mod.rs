mod commit;
mod diff;

use std::path::{Path, PathBuf};

use crate::{GitError, Result};

pub struct Repository {
    pub(crate) inner: git2::Repository,
    root: PathBuf,
}

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if the path is not inside a git repository.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|_| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        let workdir = inner.workdir().ok_or_else(|| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        // Use dunce to get a path without the \\?\ prefix on Windows
        let root = dunce::canonicalize(workdir)
            .unwrap_or_else(|_| dunce::simplified(workdir).to_path_buf());

        Ok(Self { inner, root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of `scope` relative to the working directory root.
    pub(crate) fn scope_prefix(&self, scope: &Path) -> Result<PathBuf> {
        if !scope.is_absolute() {
            return Ok(scope.to_path_buf());
        }

        let normalized =
            dunce::canonicalize(scope).unwrap_or_else(|_| dunce::simplified(scope).to_path_buf());

        normalized
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| GitError::OutsideRepository {
                path: scope.to_path_buf(),
                root: self.root.clone(),
            })
    }
}
