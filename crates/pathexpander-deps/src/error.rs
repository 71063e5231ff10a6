use std::path::PathBuf;
use thiserror::Error;

/// Result type for report parsing and workspace scanning
pub type Result<T> = std::result::Result<T, DepsError>;

/// Everything that can abort an expansion run.
///
/// Every variant is fatal. Lines that are too short to be dependencies never
/// show up here, they are skipped by the parser.
#[derive(Error, Debug)]
pub enum DepsError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to scan workspace folder {}: {source}", path.display())]
    FileSystemError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Unable to find the known path \"{fragment}\" within the full filename path of \"{path}\"")]
    MissingLayoutFragment { fragment: String, path: String },

    #[error("The file name path \"{path}\" does not start with the repo path \"{root}\"")]
    MixedRepositoryRoot { root: String, path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DepsError {
    /// True for both ways a report can violate the repository layout
    pub fn is_malformed_layout(&self) -> bool {
        matches!(
            self,
            DepsError::MissingLayoutFragment { .. } | DepsError::MixedRepositoryRoot { .. }
        )
    }
}
