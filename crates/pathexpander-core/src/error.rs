use pathexpander_deps::DepsError;
use thiserror::Error;

/// All the ways an expansion run can fail.
///
/// Parsing and scanning failures come through untouched from the deps crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Deps(#[from] DepsError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to write output: {0}")]
    OutputError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Report path problems surface as config errors too, whichever crate caught them
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::ConfigError(_) | Error::Deps(DepsError::ConfigError(_))
        )
    }
}
