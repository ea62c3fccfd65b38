use std::path::{Path, PathBuf};

use changeset_operations::operations::{
    AutogenerateInput, AutogenerateOperation, AutogenerateOutcome,
};
use changeset_operations::providers::{
    FileSystemChangesetIO, FileSystemProjectProvider, Git2Provider,
};
use clap::Args;
use tracing::debug;

use crate::error::Result;

#[derive(Args, Debug, Default)]
pub(crate) struct GenerateArgs {
    /// Report the changeset without writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Summary used when the commit message matches no rule
    #[arg(long)]
    pub fallback_summary: Option<String>,

    /// Changeset directory, relative to the project root
    #[arg(long)]
    pub changeset_dir: Option<PathBuf>,
}

impl GenerateArgs {
    pub(crate) fn is_set(&self) -> bool {
        self.dry_run || self.fallback_summary.is_some() || self.changeset_dir.is_some()
    }
}

impl From<GenerateArgs> for AutogenerateInput {
    fn from(args: GenerateArgs) -> Self {
        Self {
            dry_run: args.dry_run,
            fallback_summary: args.fallback_summary,
            changeset_dir: args.changeset_dir,
        }
    }
}

pub(crate) fn run(start_path: &Path, args: GenerateArgs, quiet: bool) -> Result<()> {
    // The operation hands the IO absolute paths under the discovered root.
    let changeset_io = FileSystemChangesetIO::new(start_path);

    let operation = AutogenerateOperation::new(
        FileSystemProjectProvider::new(),
        Git2Provider::new(),
        &changeset_io,
        &changeset_io,
    );
    debug!(start = %start_path.display(), dry_run = args.dry_run, "generating changeset");
    let outcome = operation.execute(start_path, &args.into())?;

    if !quiet {
        for line in describe_outcome(&outcome) {
            println!("{line}");
        }
    }

    Ok(())
}

fn describe_outcome(outcome: &AutogenerateOutcome) -> Vec<String> {
    match outcome {
        AutogenerateOutcome::NoCommits => vec!["No commits found; nothing to do".to_string()],
        AutogenerateOutcome::NoChangedFiles { sha } => {
            vec![format!("Commit {} changed no files; nothing to do", short(sha))]
        }
        AutogenerateOutcome::NoPackagesAffected {
            sha,
            unowned_file_count,
            ignored_file_count,
        } => vec![format!(
            "Commit {} touched no packages ({unowned_file_count} unowned, {ignored_file_count} ignored); nothing to do",
            short(sha)
        )],
        AutogenerateOutcome::PendingChangesets { paths } => {
            let mut lines = vec!["Existing changesets found; skipping".to_string()];
            lines.extend(paths.iter().map(|p| format!("  {}", p.display())));
            lines
        }
        AutogenerateOutcome::Planned { changeset } => {
            let mut lines = vec![format!("Would create changeset: {}", changeset.summary)];
            lines.extend(
                changeset
                    .releases
                    .iter()
                    .map(|r| format!("  {}: {}", r.name, r.bump_type)),
            );
            lines
        }
        AutogenerateOutcome::Created {
            changeset,
            file_path,
        } => {
            let mut lines = vec![format!("Created changeset: {}", file_path.display())];
            lines.extend(
                changeset
                    .releases
                    .iter()
                    .map(|r| format!("  {}: {}", r.name, r.bump_type)),
            );
            lines
        }
    }
}

fn short(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
