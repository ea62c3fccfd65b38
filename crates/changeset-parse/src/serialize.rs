use indexmap::IndexMap;

use changeset_core::{BumpType, Changeset};

use crate::error::{FormatError, ValidationError};
use crate::parse::FRONT_MATTER_DELIMITER;

/// Renders a changeset as a markdown record.
///
/// The layout matches what the JavaScript changesets tooling writes: front
/// matter, a blank line, then the summary.
///
/// # Errors
///
/// Returns [`FormatError`] if the changeset has no releases, releases a package
/// twice, contains an empty package name, or cannot be rendered as YAML.
#[must_use = "serialization result should be handled"]
pub fn serialize_changeset(changeset: &Changeset) -> Result<String, FormatError> {
    if changeset.releases.is_empty() {
        return Err(ValidationError::NoReleases.into());
    }

    let mut releases: IndexMap<&str, BumpType> = IndexMap::with_capacity(changeset.releases.len());
    for release in &changeset.releases {
        if release.name.is_empty() {
            return Err(ValidationError::EmptyPackageName.into());
        }
        if releases
            .insert(release.name.as_str(), release.bump_type)
            .is_some()
        {
            return Err(ValidationError::DuplicatePackage {
                name: release.name.clone(),
            }
            .into());
        }
    }

    let yaml = serde_yml::to_string(&releases)?;

    let mut output = String::new();
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    output.push_str(&yaml);
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');

    let summary = changeset.summary.trim();
    if !summary.is_empty() {
        output.push('\n');
        output.push_str(summary);
        output.push('\n');
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use changeset_core::PackageRelease;

    use super::*;
    use crate::parse::parse_changeset;

    fn release(name: &str, bump_type: BumpType) -> PackageRelease {
        PackageRelease {
            name: name.to_string(),
            bump_type,
        }
    }

    #[test]
    fn writes_front_matter_then_blank_line_then_summary() {
        let changeset = Changeset {
            summary: "correct token expiry".to_string(),
            releases: vec![release("auth", BumpType::Patch)],
        };

        let serialized = serialize_changeset(&changeset).expect("should serialize");

        assert_eq!(serialized, "---\nauth: patch\n---\n\ncorrect token expiry\n");
    }

    #[test]
    fn parses_back_to_same_changeset() {
        let original = Changeset {
            summary: "add dark mode".to_string(),
            releases: vec![
                release("ui", BumpType::Minor),
                release("ui-icons", BumpType::Minor),
                release("@acme/theme", BumpType::Minor),
            ],
        };

        let serialized = serialize_changeset(&original).expect("should serialize");
        let parsed = parse_changeset(&serialized).expect("should parse");

        assert_eq!(parsed, original);
    }

    #[test]
    fn empty_summary_omits_body() {
        let changeset = Changeset {
            summary: "   ".to_string(),
            releases: vec![release("core", BumpType::Patch)],
        };

        let serialized = serialize_changeset(&changeset).expect("should serialize");

        assert!(serialized.ends_with("---\n"));
    }

    #[test]
    fn error_empty_releases() {
        let changeset = Changeset {
            summary: "Some summary".to_string(),
            releases: vec![],
        };

        let err = serialize_changeset(&changeset).expect_err("should fail");
        assert!(err.to_string().contains("at least one release"));
    }

    #[test]
    fn error_duplicate_package() {
        let changeset = Changeset {
            summary: "Some summary".to_string(),
            releases: vec![
                release("core", BumpType::Patch),
                release("core", BumpType::Major),
            ],
        };

        let err = serialize_changeset(&changeset).expect_err("should fail");
        assert!(matches!(
            err,
            FormatError::Validation(ValidationError::DuplicatePackage { ref name }) if name == "core"
        ));
    }

    #[test]
    fn error_empty_package_name() {
        let changeset = Changeset {
            summary: "Some summary".to_string(),
            releases: vec![release("", BumpType::Patch)],
        };

        let err = serialize_changeset(&changeset).expect_err("should fail");
        assert!(matches!(
            err,
            FormatError::Validation(ValidationError::EmptyPackageName)
        ));
    }
}
