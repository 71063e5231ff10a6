use crate::{ExpandConfig, Result};
use pathexpander_deps::{parse_report, scan_projects, ArtifactCatalog, ProjectSpec};
use std::path::Path;

/// Runs one expansion: scan the declared workspace projects, then parse the report.
pub struct Expander {
    projects: Vec<ProjectSpec>,
}

impl Expander {
    pub fn new(projects: Vec<ProjectSpec>) -> Self {
        Self { projects }
    }

    pub fn from_config(config: &ExpandConfig) -> Self {
        Self::new(config.projects.clone())
    }

    /// Build the catalog for `report`. Nothing is returned unless every line
    /// resolved cleanly.
    pub fn run(&self, report: &Path) -> Result<ArtifactCatalog> {
        let index = scan_projects(&self.projects)?;
        let catalog = parse_report(report, &index)?;

        tracing::info!(
            "Expanded {} artifacts from {} ({} from workspace projects)",
            catalog.len(),
            report.display(),
            catalog.project_count()
        );
        Ok(catalog)
    }
}
