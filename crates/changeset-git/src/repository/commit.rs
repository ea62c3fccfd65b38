use crate::{CommitInfo, GitError, Result};

use super::Repository;

impl Repository {
    /// Returns the commit HEAD points at, or `None` if the repository has no commits yet.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD exists but cannot be resolved to a commit.
    pub fn latest_commit(&self) -> Result<Option<CommitInfo>> {
        let head = match self.inner.head() {
            Ok(head) => head,
            Err(e)
                if matches!(
                    e.code(),
                    git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
                ) =>
            {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let commit = head.peel_to_commit()?;

        Ok(Some(CommitInfo {
            sha: commit.id().to_string(),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        }))
    }

    pub(crate) fn resolve_commit(&self, refspec: &str) -> Result<git2::Commit<'_>> {
        self.inner
            .revparse_single(refspec)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|source| GitError::CommitNotFound {
                refspec: refspec.to_string(),
                source,
            })
    }
}
