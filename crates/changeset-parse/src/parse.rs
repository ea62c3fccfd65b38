use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{MapPreventDuplicates, serde_as};

use changeset_core::{BumpType, Changeset, PackageRelease};

use crate::error::{FormatError, FrontMatterError, ValidationError};

pub(crate) const FRONT_MATTER_DELIMITER: &str = "---";

const MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

/// A bump as recorded on disk. `none` lists a package without releasing it.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RecordedBump {
    None,
    Patch,
    Minor,
    Major,
}

impl RecordedBump {
    fn release(self) -> Option<BumpType> {
        match self {
            Self::None => None,
            Self::Patch => Some(BumpType::Patch),
            Self::Minor => Some(BumpType::Minor),
            Self::Major => Some(BumpType::Major),
        }
    }
}

#[serde_as]
#[derive(Deserialize)]
struct ReleasesMap {
    #[serde(flatten)]
    #[serde_as(as = "MapPreventDuplicates<_, _>")]
    releases: IndexMap<String, RecordedBump>,
}

fn strip_line_ending(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

fn find_closing_delimiter(content: &str) -> Option<usize> {
    if content.starts_with(FRONT_MATTER_DELIMITER) {
        return Some(0);
    }
    if let Some(pos) = content.find("\r\n---") {
        return Some(pos + 2);
    }
    content.find("\n---").map(|pos| pos + 1)
}

/// Splits a record into its YAML front matter and markdown body.
fn split_front_matter(content: &str) -> Result<(&str, &str), FormatError> {
    let trimmed = content.trim_start();

    let Some(after_opening) = trimmed.strip_prefix(FRONT_MATTER_DELIMITER) else {
        return Err(FrontMatterError::MissingOpeningDelimiter.into());
    };
    let after_opening = strip_line_ending(after_opening);

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return Err(FrontMatterError::MissingClosingDelimiter.into());
    };

    let yaml = after_opening[..closing_pos].trim_end_matches('\r');
    let body = &after_opening[closing_pos + FRONT_MATTER_DELIMITER.len()..];

    Ok((yaml, body))
}

/// Parses a markdown changeset record.
///
/// Empty front matter is a valid record with no releases, as written by
/// `changeset add --empty`. Packages bumped `none` are left out of the releases.
///
/// # Errors
///
/// Returns [`FormatError`] if the delimiters are missing, the front matter is
/// malformed, a package is named twice, or a bump type is unknown.
#[must_use = "parsing result should be handled"]
pub fn parse_changeset(content: &str) -> Result<Changeset, FormatError> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(ValidationError::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        }
        .into());
    }

    let (yaml, body) = split_front_matter(content)?;
    let recorded = if yaml.trim().is_empty() {
        IndexMap::new()
    } else {
        serde_yml::from_str::<ReleasesMap>(yaml)?.releases
    };

    let releases = recorded
        .into_iter()
        .filter_map(|(name, bump)| {
            bump.release()
                .map(|bump_type| PackageRelease { name, bump_type })
        })
        .collect();

    Ok(Changeset {
        summary: body.trim().to_string(),
        releases,
    })
}
