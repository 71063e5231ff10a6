// Everything between the command line and the parsed catalog:
// config loading, running the expansion, and rendering the results
pub mod config;
pub mod error;
pub mod expand;
pub mod export;

pub use config::ExpandConfig;
pub use error::Error;
pub use expand::Expander;
pub use export::{ArtifactListing, Exporter, PathFile, PathFormat, PathStyle, PropertiesFile, Renderer};

pub use pathexpander_deps::{ArtifactCatalog, ArtifactRecord, ProjectSpec, Scope};

/// Result type alias for the core crate
pub type Result<T> = std::result::Result<T, Error>;
