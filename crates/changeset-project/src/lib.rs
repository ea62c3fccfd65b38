mod config;
mod error;
mod manifest;
mod mapping;
mod node;
mod project;

pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";

pub use config::{RootChangesetConfig, parse_root_config};
pub use error::ProjectError;
pub use mapping::{FileMapping, PackageFiles, map_files_to_packages};
pub use project::{Project, ProjectKind, WorkspaceTool, discover_project};

pub type Result<T> = std::result::Result<T, ProjectError>;
