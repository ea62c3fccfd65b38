use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Semantic-versioning severity of a pending release, ordered `Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl BumpType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRelease {
    pub name: String,
    #[serde(rename = "type")]
    pub bump_type: BumpType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub summary: String,
    pub releases: Vec<PackageRelease>,
}

impl Changeset {
    /// Builds a changeset that releases every named package with the same bump.
    #[must_use]
    pub fn uniform<I, S>(summary: impl Into<String>, bump_type: BumpType, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            summary: summary.into(),
            releases: packages
                .into_iter()
                .map(|name| PackageRelease {
                    name: name.into(),
                    bump_type,
                })
                .collect(),
        }
    }
}

/// A package known to the workspace tooling.
///
/// `relative_path` is relative to the workspace root and is empty for the root package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub path: PathBuf,
    pub relative_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_type_ordering_patch_is_smallest() {
        assert!(BumpType::Patch < BumpType::Minor);
        assert!(BumpType::Patch < BumpType::Major);
    }

    #[test]
    fn bump_type_ordering_minor_is_middle() {
        assert!(BumpType::Minor > BumpType::Patch);
        assert!(BumpType::Minor < BumpType::Major);
    }

    #[test]
    fn bump_type_max_returns_largest() {
        let bumps = [BumpType::Patch, BumpType::Minor, BumpType::Major];
        assert_eq!(bumps.iter().max(), Some(&BumpType::Major));
    }

    #[test]
    fn bump_type_displays_lowercase() {
        assert_eq!(BumpType::Major.to_string(), "major");
        assert_eq!(BumpType::Minor.to_string(), "minor");
        assert_eq!(BumpType::Patch.to_string(), "patch");
    }

    #[test]
    fn release_serializes_with_type_key() {
        let release = PackageRelease {
            name: "auth".to_string(),
            bump_type: BumpType::Patch,
        };

        let json = serde_json::to_string(&release).expect("serialize release");

        assert_eq!(json, r#"{"name":"auth","type":"patch"}"#);
    }

    #[test]
    fn uniform_changeset_shares_bump_type() {
        let changeset = Changeset::uniform("add dark mode", BumpType::Minor, ["ui", "ui-icons"]);

        assert_eq!(changeset.summary, "add dark mode");
        assert_eq!(changeset.releases.len(), 2);
        assert!(
            changeset
                .releases
                .iter()
                .all(|r| r.bump_type == BumpType::Minor)
        );
        assert_eq!(changeset.releases[1].name, "ui-icons");
    }
}
