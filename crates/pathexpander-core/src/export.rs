use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use pathexpander_deps::{ArtifactCatalog, ArtifactRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Something that turns a catalog into developer-facing output
pub trait Renderer {
    fn render(&self, catalog: &ArtifactCatalog, out: &mut dyn Write) -> Result<()>;
}

/// How `path-file` joins its entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFormat {
    /// One line, entries joined by the platform's path list separator
    #[default]
    Classpath,
    /// One entry per line, using the platform line ending
    Text,
}

impl PathFormat {
    pub fn separator(&self) -> &'static str {
        match self {
            PathFormat::Classpath => {
                if cfg!(target_os = "windows") {
                    ";"
                } else {
                    ":"
                }
            }
            PathFormat::Text => {
                if cfg!(target_os = "windows") {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }
}

/// Picks the path written for each artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStyle {
    pub repository_variable: String,
    pub build_output_dir: String,
    /// Point at workspace build output instead of the repository when a project provides the artifact
    pub dev: bool,
}

impl PathStyle {
    pub fn entry_path(&self, record: &ArtifactRecord) -> String {
        match (&record.project, self.dev) {
            (Some(project), true) => format!(
                "{}/{}",
                project.path.trim_end_matches('/'),
                self.build_output_dir.trim_start_matches('/')
            ),
            _ => format!("{}{}", self.repository_variable, record.repo_relative_path),
        }
    }
}

/// Plain dump of the parsed records
pub struct ArtifactListing {
    pub json: bool,
}

impl Renderer for ArtifactListing {
    fn render(&self, catalog: &ArtifactCatalog, out: &mut dyn Write) -> Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut *out, catalog.records())?;
            writeln!(out)?;
        } else {
            for record in catalog {
                writeln!(out, "{}", record)?;
            }
        }
        Ok(())
    }
}

/// Classpath or line-per-entry path file
pub struct PathFile {
    pub format: PathFormat,
    pub style: PathStyle,
}

impl Renderer for PathFile {
    fn render(&self, catalog: &ArtifactCatalog, out: &mut dyn Write) -> Result<()> {
        let separator = self.format.separator();
        for (i, record) in catalog.iter().enumerate() {
            if i > 0 {
                out.write_all(separator.as_bytes())?;
            }
            out.write_all(self.style.entry_path(record).as_bytes())?;
        }
        Ok(())
    }
}

/// Java properties file keyed by artifact coordinates
pub struct PropertiesFile {
    pub style: PathStyle,
    pub generated_at: DateTime<Utc>,
}

impl PropertiesFile {
    pub fn new(style: PathStyle) -> Self {
        Self {
            style,
            generated_at: Utc::now(),
        }
    }

    /// Backslash-escape the characters a properties key can't hold literally
    fn escape_key(key: &str) -> String {
        let mut escaped = String::with_capacity(key.len());
        for c in key.chars() {
            if matches!(c, '\\' | ':' | '=' | ' ' | '#' | '!') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    fn escape_value(value: &str) -> String {
        let escaped = value.replace('\\', "\\\\");
        match escaped.strip_prefix(' ') {
            Some(rest) => format!("\\ {}", rest),
            None => escaped,
        }
    }
}

impl Renderer for PropertiesFile {
    fn render(&self, catalog: &ArtifactCatalog, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "#Generated by pathexpander")?;
        writeln!(
            out,
            "#{}",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;

        for record in catalog {
            let key = Self::escape_key(&record.coordinates());
            writeln!(
                out,
                "{}={}",
                key,
                Self::escape_value(&self.style.entry_path(record))
            )?;
            if let Some(name) = record.project_name() {
                writeln!(out, "{}.project={}", key, Self::escape_value(name))?;
            }
        }
        Ok(())
    }
}

/// Sends rendered output to a file or stdout
pub struct Exporter;

impl Exporter {
    /// Render into `path`, creating missing parent folders, or to stdout when no path is given
    pub fn write(renderer: &dyn Renderer, catalog: &ArtifactCatalog, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        Error::OutputError(format!("Failed to create {}: {}", parent.display(), e))
                    })?;
                }
                let file = File::create(path).map_err(|e| {
                    Error::OutputError(format!("Failed to create file {}: {}", path.display(), e))
                })?;
                let mut writer = BufWriter::new(file);
                renderer.render(catalog, &mut writer)?;
                writer.flush()?;
                tracing::info!("Wrote {}", path.display());
            }
            None => {
                let stdout = std::io::stdout();
                let mut writer = BufWriter::new(stdout.lock());
                renderer.render(catalog, &mut writer)?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    /// Render into a string, mostly for tests and previews
    pub fn render_to_string(renderer: &dyn Renderer, catalog: &ArtifactCatalog) -> Result<String> {
        let mut buffer = Vec::new();
        renderer.render(catalog, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::OutputError(e.to_string()))
    }
}
