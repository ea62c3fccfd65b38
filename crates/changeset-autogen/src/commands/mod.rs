mod classify;
mod generate;

use std::path::Path;

use clap::Subcommand;

use crate::error::Result;

pub(crate) use generate::GenerateArgs;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create a changeset for the latest commit (default)
    Generate(GenerateArgs),
    /// Show how a commit message would be classified
    Classify {
        /// Commit message to classify
        message: String,

        /// Summary used when no rule matches
        #[arg(long)]
        fallback_summary: Option<String>,
    },
}

impl Commands {
    pub(crate) fn execute(self, start_path: &Path, quiet: bool) -> Result<()> {
        match self {
            Self::Generate(args) => generate::run(start_path, args, quiet),
            Self::Classify {
                message,
                fallback_summary,
            } => {
                classify::run(&message, fallback_summary, quiet);
                Ok(())
            }
        }
    }
}
