mod changeset_io;
mod git_provider;
mod project_provider;

pub use changeset_io::{ChangesetReader, ChangesetWriter};
pub use git_provider::GitProvider;
pub use project_provider::ProjectProvider;
