use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("changeset generation failed")]
    Operation(#[from] changeset_operations::OperationError),
}

pub type Result<T> = std::result::Result<T, CliError>;
