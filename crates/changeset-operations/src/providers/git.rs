use std::path::Path;

use changeset_git::{CommitInfo, FileChange, Repository};

use crate::Result;
use crate::traits::GitProvider;

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn latest_commit(&self, project_root: &Path) -> Result<Option<CommitInfo>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.latest_commit()?)
    }

    fn changed_files_in_commit(&self, project_root: &Path, sha: &str) -> Result<Vec<FileChange>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.changed_files_in_commit(sha, project_root)?)
    }
}
