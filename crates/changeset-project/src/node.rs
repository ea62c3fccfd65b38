use std::path::Path;

use serde::Deserialize;

use crate::error::ProjectError;
use crate::manifest::ChangesetMetadata;

pub(crate) const PACKAGE_JSON: &str = "package.json";
pub(crate) const PNPM_WORKSPACE: &str = "pnpm-workspace.yaml";

#[derive(Debug, Deserialize, Default)]
pub(crate) struct PackageJson {
    pub(crate) name: Option<String>,
    pub(crate) workspaces: Option<Workspaces>,
    pub(crate) changeset: Option<ChangesetMetadata>,
}

/// npm and yarn accept both a bare pattern list and an object with a
/// `packages` list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Workspaces {
    Patterns(Vec<String>),
    Object {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl Workspaces {
    pub(crate) fn patterns(&self) -> &[String] {
        match self {
            Self::Patterns(patterns) | Self::Object { packages: patterns } => patterns,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct PnpmWorkspace {
    #[serde(default)]
    pub(crate) packages: Vec<String>,
}

pub(crate) fn read_package_json(path: &Path) -> Result<PackageJson, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ProjectError::PackageJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_pnpm_workspace(path: &Path) -> Result<PnpmWorkspace, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(PnpmWorkspace::default());
    }

    serde_yml::from_str(&content).map_err(|source| ProjectError::PnpmWorkspaceParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits node workspace patterns into includes and `!`-prefixed excludes.
pub(crate) fn split_negated(patterns: &[String]) -> (Vec<String>, Vec<String>) {
    let mut includes = Vec::new();
    let mut excludes = Vec::new();

    for pattern in patterns {
        match pattern.strip_prefix('!') {
            Some(negated) => excludes.push(normalize_pattern(negated)),
            None => includes.push(normalize_pattern(pattern)),
        }
    }

    (includes, excludes)
}

fn normalize_pattern(pattern: &str) -> String {
    let trimmed = pattern.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    trimmed.trim_end_matches('/').to_string()
}
