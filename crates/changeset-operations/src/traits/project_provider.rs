use std::path::Path;

use changeset_project::{Project, RootChangesetConfig};

use crate::Result;

pub trait ProjectProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if no project can be found from the given path.
    fn discover_project(&self, start_path: &Path) -> Result<Project>;

    /// # Errors
    ///
    /// Returns an error if the root manifest cannot be read or holds invalid patterns.
    fn load_config(&self, project: &Project) -> Result<RootChangesetConfig>;
}

impl<T: ProjectProvider + ?Sized> ProjectProvider for &T {
    fn discover_project(&self, start_path: &Path) -> Result<Project> {
        (**self).discover_project(start_path)
    }

    fn load_config(&self, project: &Project) -> Result<RootChangesetConfig> {
        (**self).load_config(project)
    }
}
