use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use changeset_core::Changeset;
use changeset_parse::{parse_changeset, serialize_changeset};
use tempfile::NamedTempFile;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangesetReader, ChangesetWriter};

const MAX_FILENAME_ATTEMPTS: usize = 100;
const CHANGESET_EXTENSION: &str = "md";
const README_FILENAME: &str = "README.md";

/// Reads and writes changeset files below a project root.
///
/// Relative changeset directories and paths are resolved against the root.
pub struct FileSystemChangesetIO {
    project_root: PathBuf,
}

impl FileSystemChangesetIO {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

fn is_changeset_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == CHANGESET_EXTENSION)
        && path.file_name().is_some_and(|name| name != README_FILENAME)
}

impl ChangesetReader for FileSystemChangesetIO {
    fn read_changeset(&self, path: &Path) -> Result<Changeset> {
        let full_path = self.resolve(path);
        let content =
            fs::read_to_string(&full_path).map_err(|source| OperationError::ChangesetFileRead {
                path: full_path.clone(),
                source,
            })?;
        parse_changeset(&content).map_err(|source| OperationError::ChangesetParse {
            path: full_path,
            source,
        })
    }

    fn list_changesets(&self, changeset_dir: &Path) -> Result<Vec<PathBuf>> {
        let full_path = self.resolve(changeset_dir);

        let entries = match fs::read_dir(&full_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(OperationError::ChangesetList {
                    path: full_path,
                    source,
                });
            }
        };

        let mut changesets = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|source| OperationError::ChangesetList {
                path: full_path.clone(),
                source,
            })?;
            let path = entry.path();

            if path.is_file() && is_changeset_file(&path) {
                changesets.push(path);
            }
        }

        changesets.sort();
        Ok(changesets)
    }
}

impl ChangesetWriter for FileSystemChangesetIO {
    fn write_changeset(&self, changeset_dir: &Path, changeset: &Changeset) -> Result<String> {
        let dir = self.resolve(changeset_dir);
        let content = serialize_changeset(changeset)?;

        fs::create_dir_all(&dir).map_err(|source| OperationError::ChangesetFileWrite {
            path: dir.clone(),
            source,
        })?;

        let mut temp =
            NamedTempFile::new_in(&dir).map_err(|source| OperationError::ChangesetFileWrite {
                path: dir.clone(),
                source,
            })?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|source| OperationError::ChangesetFileWrite {
                path: temp.path().to_path_buf(),
                source,
            })?;

        let candidates = std::iter::repeat_with(|| petname::petname(3, "-"))
            .take(MAX_FILENAME_ATTEMPTS)
            .flatten()
            .map(|name| format!("{name}.{CHANGESET_EXTENSION}"))
            .chain(std::iter::once(timestamp_filename()));

        persist_unique(temp, &dir, candidates)
    }
}

/// Moves `temp` to the first candidate name not already taken in `dir`.
///
/// The rename never replaces an existing file, so a concurrent writer cannot
/// be clobbered.
fn persist_unique(
    mut temp: NamedTempFile,
    dir: &Path,
    candidates: impl IntoIterator<Item = String>,
) -> Result<String> {
    let mut last_path = dir.to_path_buf();

    for filename in candidates {
        let target = dir.join(&filename);
        match temp.persist_noclobber(&target) {
            Ok(_) => return Ok(filename),
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                tracing::debug!(file = %target.display(), "changeset name taken, retrying");
                temp = e.file;
                last_path = target;
            }
            Err(e) => {
                return Err(OperationError::ChangesetFileWrite {
                    path: target,
                    source: e.error,
                });
            }
        }
    }

    Err(OperationError::ChangesetFileWrite {
        path: last_path,
        source: std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "no unused changeset file name available",
        ),
    })
}

fn timestamp_filename() -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("changeset-{timestamp}.{CHANGESET_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use changeset_core::BumpType;
    use tempfile::TempDir;

    fn sample_changeset() -> Changeset {
        Changeset::uniform("correct token expiry", BumpType::Patch, ["auth"])
    }

    #[test]
    fn is_changeset_file_filters_readme_and_other_extensions() {
        assert!(is_changeset_file(Path::new("/x/brave-lions-sing.md")));
        assert!(!is_changeset_file(Path::new("/x/README.md")));
        assert!(!is_changeset_file(Path::new("/x/config.json")));
        assert!(!is_changeset_file(Path::new("/x/notes")));
    }

    #[test]
    fn persist_unique_skips_taken_names() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("taken.md"), "existing")?;

        let mut temp = NamedTempFile::new_in(dir.path())?;
        temp.write_all(b"new content")?;

        let filename = persist_unique(
            temp,
            dir.path(),
            ["taken.md".to_string(), "free.md".to_string()],
        )?;

        assert_eq!(filename, "free.md");
        assert_eq!(fs::read_to_string(dir.path().join("taken.md"))?, "existing");
        assert_eq!(fs::read_to_string(dir.path().join("free.md"))?, "new content");
        Ok(())
    }

    #[test]
    fn persist_unique_fails_when_all_names_taken() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("taken.md"), "existing")?;
        let temp = NamedTempFile::new_in(dir.path())?;

        let result = persist_unique(temp, dir.path(), ["taken.md".to_string()]);

        assert!(matches!(
            result,
            Err(OperationError::ChangesetFileWrite { .. })
        ));
        Ok(())
    }

    #[test]
    fn write_leaves_no_temporary_files() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let io = FileSystemChangesetIO::new(dir.path());

        let filename = io.write_changeset(Path::new(".changeset"), &sample_changeset())?;

        let entries: Vec<_> = fs::read_dir(dir.path().join(".changeset"))?
            .map(|e| e.map(|e| e.file_name()))
            .collect::<std::io::Result<_>>()?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], std::ffi::OsString::from(&filename));
        Ok(())
    }

    #[test]
    fn timestamp_filename_has_changeset_extension() {
        let name = timestamp_filename();

        assert!(name.starts_with("changeset-"));
        assert!(name.ends_with(".md"));
    }
}
