use crate::{DepsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Legacy VCS metadata, never a project folder
const SVN_METADATA_DIR: &str = ".svn";

/// A locally checked-out project declared on the command line or in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    /// Root folder of the project
    #[serde(rename = "path")]
    pub root_path: PathBuf,

    /// Maven group id every folder under the root is matched against
    pub group_id: String,

    /// Name used when rendering paths for this project
    pub name: String,
}

impl ProjectSpec {
    pub fn new(root_path: impl Into<PathBuf>, group_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            group_id: group_id.into(),
            name: name.into(),
        }
    }
}

/// Folders discovered for one group id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedProject {
    pub name: String,
    /// Leaf folder name -> absolute folder path
    pub folders: HashMap<String, PathBuf>,
}

/// Group id -> indexed project, built once by [`scan_projects`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceFolderIndex {
    projects: HashMap<String, IndexedProject>,
}

impl WorkspaceFolderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Project name and folder for an artifact, if a workspace project provides it
    pub fn lookup(&self, group_id: &str, artifact_id: &str) -> Option<(&str, &Path)> {
        let project = self.projects.get(group_id)?;
        let folder = project.folders.get(artifact_id)?;
        Some((project.name.as_str(), folder.as_path()))
    }

    /// Add a folder, keeping whatever was registered first under the same name.
    ///
    /// The first project declared for a group id also names it.
    pub fn insert(&mut self, group_id: &str, project_name: &str, folder_name: String, folder: PathBuf) {
        let project = self
            .projects
            .entry(group_id.to_string())
            .or_insert_with(|| IndexedProject {
                name: project_name.to_string(),
                folders: HashMap::new(),
            });
        project.folders.entry(folder_name).or_insert(folder);
    }
}

/// Walk every declared project root and index its folders by leaf name.
///
/// Any directory that can't be read aborts the scan: a half-built index would
/// silently send artifacts to the repository instead of the workspace.
pub fn scan_projects(projects: &[ProjectSpec]) -> Result<WorkspaceFolderIndex> {
    let mut index = WorkspaceFolderIndex::new();

    for project in projects {
        let root = absolute_root(&project.root_path)?;
        tracing::debug!(
            "Scanning workspace project {} ({}) at {}",
            project.name,
            project.group_id,
            root.display()
        );

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || e.file_name() != SVN_METADATA_DIR);

        let mut folder_count = 0usize;
        for entry in walker {
            let entry = entry.map_err(|source| DepsError::FileSystemError {
                path: source.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                source,
            })?;

            if !entry.file_type().is_dir() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&root) else {
                continue;
            };
            // The root itself has an empty relative path and no leaf name
            let Some(leaf) = relative.file_name() else {
                continue;
            };

            index.insert(
                &project.group_id,
                &project.name,
                leaf.to_string_lossy().into_owned(),
                entry.path().to_path_buf(),
            );
            folder_count += 1;
        }

        tracing::debug!("Indexed {} folders under {}", folder_count, root.display());
    }

    Ok(index)
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    if root.is_absolute() {
        Ok(root.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(root))
    }
}
