use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("not a git repository: '{path}'")]
    NotARepository { path: PathBuf },

    #[error("failed to resolve commit '{refspec}'")]
    CommitNotFound {
        refspec: String,
        #[source]
        source: git2::Error,
    },

    #[error("'{path}' is outside the repository working directory '{root}'")]
    OutsideRepository { path: PathBuf, root: PathBuf },

    #[error("diff delta has no file path")]
    MissingDeltaPath,
}
