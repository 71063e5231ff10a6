use crate::models::{ArtifactCatalog, ArtifactRecord, ProjectOverlay, Scope};
use crate::resolver::{normalize_separators, RepoRootResolver};
use crate::workspace::WorkspaceFolderIndex;
use crate::{DepsError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Marker the report appends to optional dependencies
const OPTIONAL_MARKER: &str = " (optional)";

/// Which of the two report grammars a line follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    /// `group:artifact:type:classifier:version:scope:path`
    WithClassifier,
    /// `group:artifact:type:version:scope:path`
    WithoutClassifier,
}

/// Raw fields of one dependency line, borrowed from the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFields<'a> {
    pub shape: LineShape,
    pub group_id: &'a str,
    pub artifact_id: &'a str,
    pub artifact_type: &'a str,
    pub classifier: Option<&'a str>,
    pub version: &'a str,
    pub scope: &'a str,
    pub file_path: &'a str,
}

/// Split a report line into its fields.
///
/// Returns `None` for anything with fewer than five colons (banners, blank
/// lines, log noise). A sixth colon only means "classifier present" when the
/// text between the fifth and sixth colon is a scope token; otherwise the
/// sixth colon belongs to the file path (`C:\...` on Windows).
pub fn tokenize_line(line: &str) -> Option<LineFields<'_>> {
    let line = line.trim();

    let mut colons = [0usize; 6];
    let mut found = 0;
    for (idx, _) in line.match_indices(':').take(colons.len()) {
        colons[found] = idx;
        found += 1;
    }
    if found < 5 {
        return None;
    }
    let [o1, o2, o3, o4, o5, o6] = colons;

    let has_classifier = found == 6 && Scope::from_token(&line[o5 + 1..o6]).is_some();

    let mut fields = if has_classifier {
        LineFields {
            shape: LineShape::WithClassifier,
            group_id: &line[..o1],
            artifact_id: &line[o1 + 1..o2],
            artifact_type: &line[o2 + 1..o3],
            classifier: Some(&line[o3 + 1..o4]),
            version: &line[o4 + 1..o5],
            scope: &line[o5 + 1..o6],
            file_path: &line[o6 + 1..],
        }
    } else {
        LineFields {
            shape: LineShape::WithoutClassifier,
            group_id: &line[..o1],
            artifact_id: &line[o1 + 1..o2],
            artifact_type: &line[o2 + 1..o3],
            classifier: None,
            version: &line[o3 + 1..o4],
            scope: &line[o4 + 1..o5],
            file_path: &line[o5 + 1..],
        }
    };

    if let Some(stripped) = fields.file_path.strip_suffix(OPTIONAL_MARKER) {
        fields.file_path = stripped;
    }

    Some(fields)
}

/// Parse a resolve report from disk
pub fn parse_report<P: AsRef<Path>>(path: P, index: &WorkspaceFolderIndex) -> Result<ArtifactCatalog> {
    let path = path.as_ref();
    if !path.is_file() {
        let shown = std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf());
        return Err(DepsError::ConfigError(format!(
            "Unable to find the file {}",
            shown.display()
        )));
    }

    tracing::debug!("Reading resolve report {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    parse_lines(reader, index)
}

/// Parse report text already held in memory
pub fn parse_report_str(content: &str, index: &WorkspaceFolderIndex) -> Result<ArtifactCatalog> {
    parse_lines(content.as_bytes(), index)
}

/// Parse report lines, resolving repository and project paths for each one.
///
/// The repository root is taken from the first dependency line and held for
/// the rest of the report. Any layout violation aborts the whole parse.
pub fn parse_lines<R: BufRead>(reader: R, index: &WorkspaceFolderIndex) -> Result<ArtifactCatalog> {
    let mut resolver = RepoRootResolver::new();
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;

        let Some(fields) = tokenize_line(&line) else {
            skipped += 1;
            continue;
        };
        // every dependency-shaped line is held to the repository layout, kept or not
        let relative = resolver.relativize(fields.group_id, fields.artifact_id, fields.file_path)?;

        let Some(scope) = Scope::from_token(fields.scope) else {
            tracing::debug!(
                "Skipping line {}: unknown scope {:?}",
                line_no + 1,
                fields.scope
            );
            skipped += 1;
            continue;
        };

        records.push(build_record(&fields, scope, &relative, index));
    }

    tracing::info!(
        "Parsed {} artifacts ({} lines skipped)",
        records.len(),
        skipped
    );

    let root = resolver.root().map(normalize_separators);
    Ok(ArtifactCatalog::new(records, root))
}

fn build_record(
    fields: &LineFields<'_>,
    scope: Scope,
    relative: &str,
    index: &WorkspaceFolderIndex,
) -> ArtifactRecord {
    let project = index
        .lookup(fields.group_id, fields.artifact_id)
        .map(|(name, folder)| ProjectOverlay {
            path: normalize_separators(&folder.to_string_lossy()),
            name: name.to_string(),
        });
    if let Some(project) = &project {
        tracing::debug!(
            "{}:{} provided by workspace project {} at {}",
            fields.group_id,
            fields.artifact_id,
            project.name,
            project.path
        );
    }

    ArtifactRecord {
        group_id: fields.group_id.to_string(),
        artifact_id: fields.artifact_id.to_string(),
        artifact_type: fields.artifact_type.to_string(),
        classifier: fields.classifier.map(str::to_string),
        version: fields.version.to_string(),
        scope,
        file_path: normalize_separators(fields.file_path),
        repo_relative_path: normalize_separators(relative),
        project,
    }
}
