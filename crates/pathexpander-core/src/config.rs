use pathexpander_deps::ProjectSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Loaded from the config file, then overridden by CLI flags.
/// Priority: CLI > File > Defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandConfig {
    /// Prefix written in front of every repository-relative path
    #[serde(default = "default_repository_variable")]
    pub repository_variable: String,

    /// Build output folder appended to workspace projects in dev mode
    #[serde(default = "default_build_output_dir")]
    pub build_output_dir: String,

    /// Local projects that may stand in for repository artifacts
    #[serde(default)]
    pub projects: Vec<ProjectSpec>,
}

fn default_repository_variable() -> String {
    "${env.M2_HOME}".to_string()
}

fn default_build_output_dir() -> String {
    "target/classes".to_string()
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            repository_variable: default_repository_variable(),
            build_output_dir: default_build_output_dir(),
            projects: Vec::new(),
        }
    }
}

impl ExpandConfig {
    /// Load config from an explicit file, or from the default location if one exists.
    ///
    /// An explicit file that is missing is an error; a missing default file just
    /// means defaults.
    pub fn load(explicit: Option<&Path>) -> crate::Result<Self> {
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(crate::Error::ConfigError(format!(
                        "Config file {} does not exist",
                        path.display()
                    )));
                }
                Self::load_file(path)
            }
            None => match Self::config_path() {
                Some(path) if path.is_file() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Read one config file. Relative project paths are taken relative to the file.
    pub fn load_file(path: &Path) -> crate::Result<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;

        if let Some(base) = path.parent() {
            for project in &mut config.projects {
                if project.root_path.is_relative() {
                    project.root_path = base.join(&project.root_path);
                }
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> crate::Result<Self> {
        toml::from_str(contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Put command-line projects ahead of file projects, so they win on a shared group id
    pub fn with_cli_projects(mut self, cli_projects: Vec<ProjectSpec>) -> Self {
        let file_projects = std::mem::take(&mut self.projects);
        self.projects = cli_projects;
        self.projects.extend(file_projects);
        self
    }

    pub fn with_repository_variable(mut self, variable: Option<String>) -> Self {
        if let Some(variable) = variable {
            self.repository_variable = variable;
        }
        self
    }

    /// `<config dir>/pathexpander/config.toml`
    /// Uses XDG on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pathexpander").join("config.toml"))
    }
}
