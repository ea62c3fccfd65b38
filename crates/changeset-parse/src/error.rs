use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("missing opening delimiter '---'")]
    MissingOpeningDelimiter,

    #[error("missing closing delimiter '---'")]
    MissingClosingDelimiter,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("changeset must contain at least one release")]
    NoReleases,

    #[error("package '{name}' is released more than once")]
    DuplicatePackage { name: String },

    #[error("package name cannot be empty")]
    EmptyPackageName,

    #[error("input exceeds maximum size of {max_bytes} bytes")]
    InputTooLarge { max_bytes: usize },
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to parse YAML front matter: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
