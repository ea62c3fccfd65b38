use std::collections::HashMap;
use std::path::{Path, PathBuf};

use changeset_core::PackageInfo;
use globset::GlobBuilder;

use crate::error::ProjectError;
use crate::manifest::{CARGO_MANIFEST, CargoManifest, read_manifest};
use crate::node::{
    PACKAGE_JSON, PNPM_WORKSPACE, PackageJson, read_package_json, read_pnpm_workspace,
    split_negated,
};

const SKIPPED_DIRS: &[&str] = &["node_modules", "target", ".git"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    VirtualWorkspace,
    WorkspaceWithRoot,
    SinglePackage,
}

/// The package manager whose metadata described the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceTool {
    Cargo,
    Npm,
    Pnpm,
}

impl WorkspaceTool {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cargo => "cargo",
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
        }
    }
}

impl std::fmt::Display for WorkspaceTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub root: PathBuf,
    pub kind: ProjectKind,
    pub tool: WorkspaceTool,
    /// Workspace members, sorted by relative path.
    pub packages: Vec<PackageInfo>,
    /// The package living at the workspace root, if the root manifest names one.
    pub root_package: Option<PackageInfo>,
}

impl Project {
    /// Members followed by the root package.
    pub fn all_packages(&self) -> impl Iterator<Item = &PackageInfo> {
        self.packages.iter().chain(self.root_package.iter())
    }
}

enum RootMarker {
    Cargo(CargoManifest),
    Pnpm {
        patterns: Vec<String>,
        package_json: Option<PackageJson>,
    },
    Npm(PackageJson),
}

impl RootMarker {
    fn tool(&self) -> WorkspaceTool {
        match self {
            Self::Cargo(_) => WorkspaceTool::Cargo,
            Self::Pnpm { .. } => WorkspaceTool::Pnpm,
            Self::Npm(_) => WorkspaceTool::Npm,
        }
    }
}

struct FoundRoot {
    dir: PathBuf,
    marker: RootMarker,
    is_workspace: bool,
}

/// Finds the workspace enclosing `start_dir` and lists its packages.
///
/// # Errors
///
/// Returns `ProjectError` if no project root can be found or if manifest parsing fails.
pub fn discover_project(start_dir: &Path) -> Result<Project, ProjectError> {
    let start_dir = dunce::canonicalize(start_dir).map_err(|source| ProjectError::DirectoryRead {
        path: start_dir.to_path_buf(),
        source,
    })?;

    let found = find_project_root(&start_dir)?;
    let tool = found.marker.tool();
    let root = found.dir;

    let (packages, root_package) = if found.is_workspace {
        collect_workspace(&root, &found.marker)?
    } else {
        let root_package = root_package_name(&found.marker).map(|name| PackageInfo {
            name,
            path: root.clone(),
            relative_path: PathBuf::new(),
        });
        (Vec::new(), root_package)
    };

    let kind = match (found.is_workspace, root_package.is_some()) {
        (false, _) => ProjectKind::SinglePackage,
        (true, true) => ProjectKind::WorkspaceWithRoot,
        (true, false) => ProjectKind::VirtualWorkspace,
    };

    let project = Project {
        root,
        kind,
        tool,
        packages,
        root_package,
    };
    check_unique_names(&project)?;

    Ok(project)
}

fn find_project_root(start_dir: &Path) -> Result<FoundRoot, ProjectError> {
    let mut current = start_dir.to_path_buf();
    let mut fallback_single_package: Option<FoundRoot> = None;

    loop {
        let cargo_path = current.join(CARGO_MANIFEST);
        if cargo_path.is_file() {
            let manifest = read_manifest(&cargo_path)?;

            if manifest.workspace.is_some() {
                return Ok(FoundRoot {
                    dir: current,
                    marker: RootMarker::Cargo(manifest),
                    is_workspace: true,
                });
            }

            if manifest.package.is_some() && fallback_single_package.is_none() {
                fallback_single_package = Some(FoundRoot {
                    dir: current.clone(),
                    marker: RootMarker::Cargo(manifest),
                    is_workspace: false,
                });
            }
        }

        let package_json_path = current.join(PACKAGE_JSON);
        let package_json = if package_json_path.is_file() {
            Some(read_package_json(&package_json_path)?)
        } else {
            None
        };

        let pnpm_path = current.join(PNPM_WORKSPACE);
        if pnpm_path.is_file() {
            let workspace = read_pnpm_workspace(&pnpm_path)?;
            return Ok(FoundRoot {
                dir: current,
                marker: RootMarker::Pnpm {
                    patterns: workspace.packages,
                    package_json,
                },
                is_workspace: true,
            });
        }

        if let Some(package_json) = package_json {
            if package_json.workspaces.is_some() {
                return Ok(FoundRoot {
                    dir: current,
                    marker: RootMarker::Npm(package_json),
                    is_workspace: true,
                });
            }

            if package_json.name.is_some() && fallback_single_package.is_none() {
                fallback_single_package = Some(FoundRoot {
                    dir: current.clone(),
                    marker: RootMarker::Npm(package_json),
                    is_workspace: false,
                });
            }
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => {
                return fallback_single_package.ok_or_else(|| ProjectError::NotFound {
                    start_dir: start_dir.to_path_buf(),
                });
            }
        }
    }
}

fn root_package_name(marker: &RootMarker) -> Option<String> {
    match marker {
        RootMarker::Cargo(manifest) => manifest.package.as_ref().map(|pkg| pkg.name.clone()),
        RootMarker::Pnpm { package_json, .. } => {
            package_json.as_ref().and_then(|pkg| pkg.name.clone())
        }
        RootMarker::Npm(package_json) => package_json.name.clone(),
    }
}

fn collect_workspace(
    root: &Path,
    marker: &RootMarker,
) -> Result<(Vec<PackageInfo>, Option<PackageInfo>), ProjectError> {
    let (includes, excludes) = match marker {
        RootMarker::Cargo(manifest) => {
            let workspace = manifest.workspace.as_ref();
            (
                workspace
                    .and_then(|ws| ws.members.clone())
                    .unwrap_or_default(),
                workspace
                    .and_then(|ws| ws.exclude.clone())
                    .unwrap_or_default(),
            )
        }
        RootMarker::Pnpm { patterns, .. } => split_negated(patterns),
        RootMarker::Npm(package_json) => split_negated(
            package_json
                .workspaces
                .as_ref()
                .map(crate::node::Workspaces::patterns)
                .unwrap_or_default(),
        ),
    };

    let mut member_dirs = Vec::new();
    for pattern in &includes {
        for dir in expand_glob_pattern(root, pattern, &excludes)? {
            if !member_dirs.contains(&dir) {
                member_dirs.push(dir);
            }
        }
    }

    let mut packages = Vec::new();
    for relative_path in member_dirs {
        let path = root.join(&relative_path);
        if let Some(name) = member_package_name(&path, marker.tool())? {
            packages.push(PackageInfo {
                name,
                path,
                relative_path,
            });
        }
    }
    packages.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    let root_package = root_package_name(marker).map(|name| PackageInfo {
        name,
        path: root.to_path_buf(),
        relative_path: PathBuf::new(),
    });

    Ok((packages, root_package))
}

fn member_package_name(dir: &Path, tool: WorkspaceTool) -> Result<Option<String>, ProjectError> {
    match tool {
        WorkspaceTool::Cargo => {
            let manifest_path = dir.join(CARGO_MANIFEST);
            if !manifest_path.is_file() {
                return Ok(None);
            }
            Ok(read_manifest(&manifest_path)?.package.map(|pkg| pkg.name))
        }
        WorkspaceTool::Npm | WorkspaceTool::Pnpm => {
            let manifest_path = dir.join(PACKAGE_JSON);
            if !manifest_path.is_file() {
                return Ok(None);
            }
            Ok(read_package_json(&manifest_path)?.name)
        }
    }
}

fn check_unique_names(project: &Project) -> Result<(), ProjectError> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();

    for package in project.all_packages() {
        if let Some(first) = seen.insert(package.name.as_str(), package.path.as_path()) {
            return Err(ProjectError::DuplicatePackage {
                name: package.name.clone(),
                first: first.to_path_buf(),
                second: package.path.clone(),
            });
        }
    }

    Ok(())
}

/// Expands a member pattern into directories relative to `root`.
fn expand_glob_pattern(
    root: &Path,
    pattern: &str,
    excludes: &[String],
) -> Result<Vec<PathBuf>, ProjectError> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| ProjectError::GlobPattern {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    let exclude_matchers = excludes
        .iter()
        .map(|ex| {
            GlobBuilder::new(ex)
                .literal_separator(true)
                .build()
                .map(|g| g.compile_matcher())
                .map_err(|source| ProjectError::GlobPattern {
                    pattern: ex.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut dirs = Vec::new();
    collect_matching_dirs(root, Path::new(""), &glob, &exclude_matchers, &mut dirs)?;

    Ok(dirs)
}

fn collect_matching_dirs(
    root: &Path,
    relative: &Path,
    glob: &globset::GlobMatcher,
    excludes: &[globset::GlobMatcher],
    results: &mut Vec<PathBuf>,
) -> Result<(), ProjectError> {
    let current = root.join(relative);
    let entries = std::fs::read_dir(&current).map_err(|source| ProjectError::DirectoryRead {
        path: current.clone(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| ProjectError::DirectoryRead {
            path: current.clone(),
            source,
        })?;

        if !entry.file_type().is_ok_and(|ft| ft.is_dir()) {
            continue;
        }

        let file_name = entry.file_name();
        if SKIPPED_DIRS.iter().any(|skipped| file_name == *skipped) {
            continue;
        }

        let child = relative.join(&file_name);

        if excludes.iter().any(|ex| ex.is_match(&child)) {
            continue;
        }

        if glob.is_match(&child) {
            results.push(child.clone());
        }

        collect_matching_dirs(root, &child, glob, excludes, results)?;
    }

    Ok(())
}
