use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::ProjectError;
use crate::manifest::{CARGO_MANIFEST, ChangesetMetadata, read_manifest};
use crate::node::{PACKAGE_JSON, read_package_json};
use crate::project::{Project, WorkspaceTool};

#[derive(Debug, Clone)]
pub struct RootChangesetConfig {
    ignored_files: GlobSet,
    changeset_dir: PathBuf,
}

impl Default for RootChangesetConfig {
    fn default() -> Self {
        Self {
            ignored_files: GlobSet::empty(),
            changeset_dir: PathBuf::from(crate::DEFAULT_CHANGESET_DIR),
        }
    }
}

impl RootChangesetConfig {
    /// # Errors
    ///
    /// Returns `ProjectError::GlobPattern` if any pattern is invalid.
    pub fn new(
        ignored_patterns: &[String],
        changeset_dir: impl Into<PathBuf>,
    ) -> Result<Self, ProjectError> {
        Ok(Self {
            ignored_files: build_glob_set(ignored_patterns)?,
            changeset_dir: changeset_dir.into(),
        })
    }

    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignored_files.is_match(path)
    }

    /// Directory holding changeset files, relative to the project root unless absolute.
    #[must_use]
    pub fn changeset_dir(&self) -> &Path {
        &self.changeset_dir
    }

    #[must_use]
    pub fn with_changeset_dir(mut self, changeset_dir: impl Into<PathBuf>) -> Self {
        self.changeset_dir = changeset_dir.into();
        self
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, ProjectError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ProjectError::GlobPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ProjectError::GlobPattern {
        pattern: patterns.join(", "),
        source,
    })
}

fn config_from_metadata(
    metadata: Option<ChangesetMetadata>,
) -> Result<RootChangesetConfig, ProjectError> {
    let metadata = metadata.unwrap_or_default();
    let changeset_dir = metadata
        .changeset_dir
        .unwrap_or_else(|| crate::DEFAULT_CHANGESET_DIR.to_string());

    RootChangesetConfig::new(&metadata.ignored_files, changeset_dir)
}

/// Reads the changeset configuration from the project's root manifest.
///
/// Cargo projects use `[workspace.metadata.changeset]`, falling back to
/// `[package.metadata.changeset]`. Node projects use the `"changeset"` object
/// of the root `package.json`, which may be absent for pnpm workspaces.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, or if glob patterns are invalid.
pub fn parse_root_config(project: &Project) -> Result<RootChangesetConfig, ProjectError> {
    let metadata = match project.tool {
        WorkspaceTool::Cargo => {
            let manifest = read_manifest(&project.root.join(CARGO_MANIFEST))?;
            manifest.changeset_metadata().cloned()
        }
        WorkspaceTool::Npm | WorkspaceTool::Pnpm => {
            let path = project.root.join(PACKAGE_JSON);
            if path.is_file() {
                read_package_json(&path)?.changeset
            } else {
                None
            }
        }
    };

    config_from_metadata(metadata)
}
