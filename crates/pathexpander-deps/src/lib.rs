// Dependency report parsing
// Turns dependency:resolve output into artifact records with resolved repo and project paths

pub mod error;
pub mod models;
pub mod parsers;
pub mod resolver;
pub mod workspace;

pub use error::{DepsError, Result};
pub use models::{ArtifactCatalog, ArtifactRecord, ProjectOverlay, Scope};
pub use parsers::{parse_lines, parse_report, parse_report_str, tokenize_line, LineFields, LineShape};
pub use resolver::RepoRootResolver;
pub use workspace::{scan_projects, IndexedProject, ProjectSpec, WorkspaceFolderIndex};
