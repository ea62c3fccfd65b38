use std::path::{Path, PathBuf};

use changeset_core::Changeset;
use changeset_git::FileStatus;
use changeset_project::map_files_to_packages;
use tracing::{debug, info};

use crate::Result;
use crate::classifier::CommitClassifier;
use crate::traits::{ChangesetReader, ChangesetWriter, GitProvider, ProjectProvider};

#[derive(Debug, Clone, Default)]
pub struct AutogenerateInput {
    /// Run every stage but the write.
    pub dry_run: bool,
    pub fallback_summary: Option<String>,
    /// Overrides the changeset directory from the manifest configuration.
    pub changeset_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum AutogenerateOutcome {
    NoCommits,
    NoChangedFiles {
        sha: String,
    },
    NoPackagesAffected {
        sha: String,
        unowned_file_count: usize,
        ignored_file_count: usize,
    },
    PendingChangesets {
        paths: Vec<PathBuf>,
    },
    Planned {
        changeset: Changeset,
    },
    Created {
        changeset: Changeset,
        file_path: PathBuf,
    },
}

impl AutogenerateOutcome {
    /// The changeset this run produced or would produce.
    #[must_use]
    pub fn changeset(&self) -> Option<&Changeset> {
        match self {
            Self::Planned { changeset } | Self::Created { changeset, .. } => Some(changeset),
            _ => None,
        }
    }
}

/// Generates a changeset for the latest commit unless one is already pending.
pub struct AutogenerateOperation<P, G, R, W> {
    project_provider: P,
    git_provider: G,
    changeset_reader: R,
    changeset_writer: W,
}

impl<P, G, R, W> AutogenerateOperation<P, G, R, W>
where
    P: ProjectProvider,
    G: GitProvider,
    R: ChangesetReader,
    W: ChangesetWriter,
{
    pub fn new(
        project_provider: P,
        git_provider: G,
        changeset_reader: R,
        changeset_writer: W,
    ) -> Self {
        Self {
            project_provider,
            git_provider,
            changeset_reader,
            changeset_writer,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the workspace or repository cannot be read, if an
    /// existing changeset cannot be read or parsed, or if the new changeset
    /// cannot be written.
    pub fn execute(
        &self,
        start_path: &Path,
        input: &AutogenerateInput,
    ) -> Result<AutogenerateOutcome> {
        let project = self.project_provider.discover_project(start_path)?;
        debug!(
            root = %project.root.display(),
            tool = %project.tool,
            packages = project.all_packages().count(),
            "discovered project"
        );

        let mut config = self.project_provider.load_config(&project)?;
        if let Some(dir) = &input.changeset_dir {
            config = config.with_changeset_dir(dir);
        }

        let Some(commit) = self.git_provider.latest_commit(&project.root)? else {
            info!("repository has no commits");
            return Ok(AutogenerateOutcome::NoCommits);
        };
        debug!(sha = %commit.short_sha(), subject = %commit.subject(), "inspecting latest commit");

        let changes = self
            .git_provider
            .changed_files_in_commit(&project.root, &commit.sha)?;
        if changes.is_empty() {
            info!(sha = %commit.short_sha(), "latest commit changed no files");
            return Ok(AutogenerateOutcome::NoChangedFiles { sha: commit.sha });
        }

        let deleted = changes
            .iter()
            .filter(|c| c.status == FileStatus::Deleted)
            .count();
        let changed_paths: Vec<PathBuf> = changes.into_iter().map(|c| c.path).collect();
        let mapping = map_files_to_packages(&project, &changed_paths, &config);
        let packages = mapping.affected_package_names();
        debug!(
            changed = changed_paths.len(),
            deleted,
            ignored = mapping.ignored_files.len(),
            unowned = mapping.unowned_files.len(),
            affected = packages.len(),
            "mapped changed files to packages"
        );

        if packages.is_empty() {
            info!(sha = %commit.short_sha(), "latest commit touched no packages");
            return Ok(AutogenerateOutcome::NoPackagesAffected {
                sha: commit.sha,
                unowned_file_count: mapping.unowned_files.len(),
                ignored_file_count: mapping.ignored_files.len(),
            });
        }

        let classifier = match &input.fallback_summary {
            Some(summary) => CommitClassifier::new().with_fallback_summary(summary),
            None => CommitClassifier::new(),
        };
        let classification = classifier.classify_commit(&commit);
        debug!(
            bump = %classification.bump_type,
            rule = classification.rule.unwrap_or("fallback"),
            summary = %classification.summary,
            "classified commit"
        );
        if classification.is_fallback() {
            info!(
                subject = %commit.subject(),
                "commit follows no known convention, using fallback summary"
            );
        }

        let changeset_dir = project.root.join(config.changeset_dir());
        let existing = self.changeset_reader.list_changesets(&changeset_dir)?;
        for path in &existing {
            self.changeset_reader.read_changeset(path)?;
        }
        if !existing.is_empty() {
            info!(
                count = existing.len(),
                dir = %changeset_dir.display(),
                "changesets already pending, skipping"
            );
            return Ok(AutogenerateOutcome::PendingChangesets { paths: existing });
        }

        let changeset = Changeset::uniform(
            classification.summary,
            classification.bump_type,
            packages,
        );

        if input.dry_run {
            return Ok(AutogenerateOutcome::Planned { changeset });
        }

        let filename = self
            .changeset_writer
            .write_changeset(&changeset_dir, &changeset)?;
        let file_path = changeset_dir.join(filename);
        info!(file = %file_path.display(), releases = changeset.releases.len(), "created changeset");

        Ok(AutogenerateOutcome::Created {
            changeset,
            file_path,
        })
    }
}
