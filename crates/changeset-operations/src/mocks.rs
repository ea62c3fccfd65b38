use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use changeset_core::{Changeset, PackageInfo};
use changeset_git::{CommitInfo, FileChange, FileStatus};
use changeset_project::{Project, ProjectKind, RootChangesetConfig, WorkspaceTool};

use crate::Result;
use crate::traits::{ChangesetReader, ChangesetWriter, GitProvider, ProjectProvider};

pub struct MockProjectProvider {
    project: Project,
    root_config: RootChangesetConfig,
}

impl MockProjectProvider {
    #[must_use]
    pub fn new(project: Project) -> Self {
        Self {
            project,
            root_config: RootChangesetConfig::default(),
        }
    }

    #[must_use]
    pub fn with_root_config(mut self, config: RootChangesetConfig) -> Self {
        self.root_config = config;
        self
    }

    #[must_use]
    pub fn with_root_package(mut self, name: &str) -> Self {
        self.project.root_package = Some(PackageInfo {
            name: name.to_string(),
            path: self.project.root.clone(),
            relative_path: PathBuf::new(),
        });
        self.project.kind = ProjectKind::WorkspaceWithRoot;
        self
    }

    /// Builds a workspace from `(name, relative directory)` pairs.
    #[must_use]
    pub fn workspace(packages: Vec<(&str, &str)>) -> Self {
        let root = PathBuf::from("/mock/workspace");
        let pkg_infos: Vec<PackageInfo> = packages
            .into_iter()
            .map(|(name, relative)| PackageInfo {
                name: name.to_string(),
                path: root.join(relative),
                relative_path: PathBuf::from(relative),
            })
            .collect();

        let project = Project {
            root,
            kind: ProjectKind::VirtualWorkspace,
            tool: WorkspaceTool::Npm,
            packages: pkg_infos,
            root_package: None,
        };
        Self::new(project)
    }
}

impl ProjectProvider for MockProjectProvider {
    fn discover_project(&self, _start_path: &Path) -> Result<Project> {
        Ok(self.project.clone())
    }

    fn load_config(&self, _project: &Project) -> Result<RootChangesetConfig> {
        Ok(self.root_config.clone())
    }
}

pub struct MockGitProvider {
    commit: Option<CommitInfo>,
    changed_files: Vec<FileChange>,
    diffed: Mutex<Vec<String>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            commit: None,
            changed_files: Vec::new(),
            diffed: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_commit(mut self, message: &str) -> Self {
        self.commit = Some(CommitInfo {
            sha: "abc123def4567890".to_string(),
            message: message.to_string(),
        });
        self
    }

    /// Adds modified files by path.
    #[must_use]
    pub fn with_modified(mut self, paths: &[&str]) -> Self {
        self.changed_files.extend(
            paths
                .iter()
                .map(|p| FileChange::new(PathBuf::from(p), FileStatus::Modified)),
        );
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn diffed_commits(&self) -> Vec<String> {
        self.diffed.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn latest_commit(&self, _project_root: &Path) -> Result<Option<CommitInfo>> {
        Ok(self.commit.clone())
    }

    fn changed_files_in_commit(&self, _project_root: &Path, sha: &str) -> Result<Vec<FileChange>> {
        self.diffed
            .lock()
            .expect("lock poisoned")
            .push(sha.to_string());
        Ok(self.changed_files.clone())
    }
}

pub struct MockChangesetReader {
    changesets: HashMap<PathBuf, Changeset>,
    listed_files: Vec<PathBuf>,
    listed_dirs: Mutex<Vec<PathBuf>>,
}

impl MockChangesetReader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            changesets: HashMap::new(),
            listed_files: Vec::new(),
            listed_dirs: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_changeset(mut self, path: PathBuf, changeset: Changeset) -> Self {
        self.listed_files.push(path.clone());
        self.changesets.insert(path, changeset);
        self
    }

    /// Lists `path` without content, so reading it fails.
    #[must_use]
    pub fn with_unreadable_file(mut self, path: PathBuf) -> Self {
        self.listed_files.push(path);
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn listed_dirs(&self) -> Vec<PathBuf> {
        self.listed_dirs.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockChangesetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangesetReader for MockChangesetReader {
    fn read_changeset(&self, path: &Path) -> Result<Changeset> {
        self.changesets.get(path).cloned().ok_or_else(|| {
            crate::OperationError::ChangesetFileRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock file not found"),
            }
        })
    }

    fn list_changesets(&self, changeset_dir: &Path) -> Result<Vec<PathBuf>> {
        self.listed_dirs
            .lock()
            .expect("lock poisoned")
            .push(changeset_dir.to_path_buf());
        Ok(self.listed_files.clone())
    }
}

pub struct MockChangesetWriter {
    written: Mutex<Vec<(PathBuf, Changeset)>>,
    filename: String,
}

impl MockChangesetWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            written: Mutex::new(Vec::new()),
            filename: "mock-changeset.md".to_string(),
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: &str) -> Self {
        self.filename = filename.to_string();
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written_changesets(&self) -> Vec<(PathBuf, Changeset)> {
        self.written.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockChangesetWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangesetWriter for MockChangesetWriter {
    fn write_changeset(&self, changeset_dir: &Path, changeset: &Changeset) -> Result<String> {
        self.written
            .lock()
            .expect("lock poisoned")
            .push((changeset_dir.to_path_buf(), changeset.clone()));
        Ok(self.filename.clone())
    }
}
