mod changeset_io;
mod git;
mod project;

pub use changeset_io::FileSystemChangesetIO;
pub use git::Git2Provider;
pub use project::FileSystemProjectProvider;
