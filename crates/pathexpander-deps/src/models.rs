use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency scope as printed by the resolve report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
}

impl Scope {
    pub const ALL: [Scope; 6] = [
        Scope::Compile,
        Scope::Provided,
        Scope::Runtime,
        Scope::Test,
        Scope::System,
        Scope::Import,
    ];

    /// Exact, case-sensitive match against the report's scope tokens
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "compile" => Some(Scope::Compile),
            "provided" => Some(Scope::Provided),
            "runtime" => Some(Scope::Runtime),
            "test" => Some(Scope::Test),
            "system" => Some(Scope::System),
            "import" => Some(Scope::Import),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Provided => "provided",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Import => "import",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local workspace folder standing in for a repository artifact.
///
/// Path and name always travel together, so a record either has both or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOverlay {
    #[serde(rename = "project_relative_path")]
    pub path: String,
    #[serde(rename = "project_name")]
    pub name: String,
}

/// One resolved dependency line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRecord {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub classifier: Option<String>,
    pub version: String,
    pub scope: Scope,
    pub file_path: String,
    pub repo_relative_path: String,
    #[serde(flatten)]
    pub project: Option<ProjectOverlay>,
}

impl ArtifactRecord {
    pub fn project_relative_path(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.path.as_str())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }

    /// `group:artifact:type[:classifier]`, the coordinates without version or scope
    pub fn coordinates(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}:{}:{}:{}",
                self.group_id, self.artifact_id, self.artifact_type, classifier
            ),
            None => format!("{}:{}:{}", self.group_id, self.artifact_id, self.artifact_type),
        }
    }
}

impl fmt::Display for ArtifactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArtifactInfo(groupId={}, artifactId={}, scope={}, version={}, type={}, classifier={}, \
             filePath={}, repoRelativePath={}, projectRelativePath={}, projectName={})",
            self.group_id,
            self.artifact_id,
            self.scope,
            self.version,
            self.artifact_type,
            self.classifier.as_deref().unwrap_or("null"),
            self.file_path,
            self.repo_relative_path,
            self.project_relative_path().unwrap_or("null"),
            self.project_name().unwrap_or("null"),
        )
    }
}

/// Ordered, read-only result of parsing one report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactCatalog {
    records: Vec<ArtifactRecord>,
    repository_root: Option<String>,
}

impl ArtifactCatalog {
    pub fn new(records: Vec<ArtifactRecord>, repository_root: Option<String>) -> Self {
        Self {
            records,
            repository_root,
        }
    }

    pub fn records(&self) -> &[ArtifactRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArtifactRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Root derived from the first record, normalized like the record paths.
    /// `None` when the report held no dependency lines.
    pub fn repository_root(&self) -> Option<&str> {
        self.repository_root.as_deref()
    }

    pub fn project_count(&self) -> usize {
        self.records.iter().filter(|r| r.project.is_some()).count()
    }
}

impl<'a> IntoIterator for &'a ArtifactCatalog {
    type Item = &'a ArtifactRecord;
    type IntoIter = std::slice::Iter<'a, ArtifactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
