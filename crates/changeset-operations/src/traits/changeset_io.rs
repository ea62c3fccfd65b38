use std::path::{Path, PathBuf};

use changeset_core::Changeset;

use crate::Result;

pub trait ChangesetReader: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn read_changeset(&self, path: &Path) -> Result<Changeset>;

    /// Lists pending changeset files. A missing directory holds no changesets.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    fn list_changesets(&self, changeset_dir: &Path) -> Result<Vec<PathBuf>>;
}

pub trait ChangesetWriter: Send + Sync {
    /// Persists `changeset` under a fresh name and returns the file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the changeset cannot be serialized or written.
    fn write_changeset(&self, changeset_dir: &Path, changeset: &Changeset) -> Result<String>;
}

impl<T: ChangesetReader + ?Sized> ChangesetReader for &T {
    fn read_changeset(&self, path: &Path) -> Result<Changeset> {
        (**self).read_changeset(path)
    }

    fn list_changesets(&self, changeset_dir: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_changesets(changeset_dir)
    }
}

impl<T: ChangesetWriter + ?Sized> ChangesetWriter for &T {
    fn write_changeset(&self, changeset_dir: &Path, changeset: &Changeset) -> Result<String> {
        (**self).write_changeset(changeset_dir, changeset)
    }
}
