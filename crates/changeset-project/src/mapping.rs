use std::collections::HashMap;
use std::path::{Path, PathBuf};

use changeset_core::PackageInfo;

use crate::config::RootChangesetConfig;
use crate::project::Project;

/// Mapping of files to a single package.
///
/// This is a data transfer object with intentionally public fields for direct access.
#[derive(Debug)]
pub struct PackageFiles {
    pub package: PackageInfo,
    pub files: Vec<PathBuf>,
}

/// Result of mapping changed files to packages.
///
/// This is a data transfer object with intentionally public fields for direct access.
#[derive(Debug, Default)]
pub struct FileMapping {
    /// One entry per package, in workspace order, including untouched packages.
    pub package_files: Vec<PackageFiles>,
    /// Files no package directory contains.
    pub unowned_files: Vec<PathBuf>,
    /// Files matching the configured ignore patterns.
    pub ignored_files: Vec<PathBuf>,
}

impl FileMapping {
    #[must_use]
    pub fn affected_packages(&self) -> Vec<&PackageInfo> {
        self.package_files
            .iter()
            .filter(|pf| !pf.files.is_empty())
            .map(|pf| &pf.package)
            .collect()
    }

    #[must_use]
    pub fn affected_package_names(&self) -> Vec<String> {
        self.affected_packages()
            .into_iter()
            .map(|p| p.name.clone())
            .collect()
    }
}

struct PackageWithDepth<'a> {
    package: &'a PackageInfo,
    depth: usize,
}

fn calculate_path_depth(path: &Path) -> usize {
    path.components().count()
}

/// Assigns each changed file to the package with the deepest directory
/// containing it.
///
/// `changed_files` are relative to the project root; absolute paths are
/// re-expressed relative to it first. The root package, whose relative
/// directory is empty, contains every file.
#[must_use]
pub fn map_files_to_packages(
    project: &Project,
    changed_files: &[PathBuf],
    root_config: &RootChangesetConfig,
) -> FileMapping {
    let mut packages_with_depth: Vec<PackageWithDepth<'_>> = project
        .all_packages()
        .map(|package| PackageWithDepth {
            package,
            depth: calculate_path_depth(&package.relative_path),
        })
        .collect();

    packages_with_depth.sort_by(|a, b| b.depth.cmp(&a.depth));

    let mut package_files_map: HashMap<&str, Vec<PathBuf>> = HashMap::new();
    let mut unowned_files = Vec::new();
    let mut ignored_files = Vec::new();

    for file in changed_files {
        let relative = if file.is_absolute() {
            match file.strip_prefix(&project.root) {
                Ok(relative) => relative,
                Err(_) => {
                    unowned_files.push(file.clone());
                    continue;
                }
            }
        } else {
            file.as_path()
        };

        if root_config.is_ignored(relative) {
            ignored_files.push(file.clone());
            continue;
        }

        let owner = packages_with_depth
            .iter()
            .find(|pwd| relative.starts_with(&pwd.package.relative_path));

        match owner {
            Some(pwd) => package_files_map
                .entry(pwd.package.name.as_str())
                .or_default()
                .push(file.clone()),
            None => unowned_files.push(file.clone()),
        }
    }

    let package_files = project
        .all_packages()
        .map(|p| PackageFiles {
            package: p.clone(),
            files: package_files_map.remove(p.name.as_str()).unwrap_or_default(),
        })
        .collect();

    FileMapping {
        package_files,
        unowned_files,
        ignored_files,
    }
}
