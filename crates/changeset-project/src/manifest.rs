use std::path::Path;

use serde::Deserialize;

use crate::error::ProjectError;

pub(crate) const CARGO_MANIFEST: &str = "Cargo.toml";

#[derive(Debug, Deserialize)]
pub(crate) struct CargoManifest {
    pub(crate) package: Option<Package>,
    pub(crate) workspace: Option<WorkspaceSection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Package {
    pub(crate) name: String,
    pub(crate) metadata: Option<Metadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkspaceSection {
    pub(crate) members: Option<Vec<String>>,
    pub(crate) exclude: Option<Vec<String>>,
    pub(crate) metadata: Option<Metadata>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct Metadata {
    pub(crate) changeset: Option<ChangesetMetadata>,
}

/// The `changeset` configuration table, shared by `Cargo.toml` metadata and
/// the `"changeset"` object of a root `package.json`.
#[derive(Debug, Deserialize, Default, Clone)]
pub(crate) struct ChangesetMetadata {
    #[serde(default, rename = "ignored-files", alias = "ignoredFiles")]
    pub(crate) ignored_files: Vec<String>,
    #[serde(default, rename = "changeset-dir", alias = "changesetDir")]
    pub(crate) changeset_dir: Option<String>,
}

pub(crate) fn read_manifest(path: &Path) -> Result<CargoManifest, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ProjectError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

impl CargoManifest {
    pub(crate) fn changeset_metadata(&self) -> Option<&ChangesetMetadata> {
        let from_workspace = self
            .workspace
            .as_ref()
            .and_then(|ws| ws.metadata.as_ref())
            .and_then(|meta| meta.changeset.as_ref());

        from_workspace.or_else(|| {
            self.package
                .as_ref()
                .and_then(|pkg| pkg.metadata.as_ref())
                .and_then(|meta| meta.changeset.as_ref())
        })
    }
}
