use anyhow::Context;
use clap::{Parser, ValueEnum};
use pathexpander_core::{
    ArtifactListing, Error, ExpandConfig, Expander, Exporter, PathFile, PathFormat, PathStyle,
    ProjectSpec, PropertiesFile, Renderer,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pathexpander")]
#[command(version, about = "Expands the build path produced by dependency:resolve", long_about = None)]
struct Cli {
    /// Output file from dependency:resolve
    #[arg(long = "resolve-path", visible_alias = "resolvePath", value_name = "FILE")]
    resolve_path: PathBuf,

    /// Root folder of a local project (pair with --group-id and --name)
    #[arg(long = "project-path", visible_alias = "projectPath", value_name = "DIR")]
    project_paths: Vec<PathBuf>,

    /// Maven group id of the matching --project-path
    #[arg(long = "group-id", visible_alias = "groupId", value_name = "GROUP_ID")]
    group_ids: Vec<String>,

    /// Name of the matching --project-path, used for property resolving
    #[arg(long = "name", value_name = "NAME")]
    names: Vec<String>,

    /// Config file (defaults to <config dir>/pathexpander/config.toml when present)
    #[arg(long, value_name = "FILE", env = "PATHEXPANDER_CONFIG")]
    config: Option<PathBuf>,

    /// Prefix for repository paths, e.g. ${env.M2_HOME}
    #[arg(long = "repo-var", value_name = "VAR")]
    repo_var: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print every parsed artifact (the default)
    List {
        /// Emit JSON instead of one line per artifact
        #[arg(long)]
        json: bool,
    },
    /// Generate a dev path that can be used from within an IDE
    #[command(visible_alias = "pathFile")]
    PathFile {
        /// The format to write
        #[arg(long, value_enum, default_value_t = FormatArg::Classpath)]
        format: FormatArg,

        /// Use workspace project build output where available
        #[arg(long)]
        dev: bool,

        /// Where to store the output; stdout when omitted
        #[arg(long = "output-file", visible_alias = "outputFile", value_name = "FILE")]
        output_file: Option<PathBuf>,
    },
    /// Generate a properties file keyed by artifact coordinates
    Properties {
        /// Use workspace project build output where available
        #[arg(long)]
        dev: bool,

        /// Where to store the output; stdout when omitted
        #[arg(long = "output-file", visible_alias = "outputFile", value_name = "FILE")]
        output_file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Classpath,
    Text,
}

impl From<FormatArg> for PathFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Classpath => PathFormat::Classpath,
            FormatArg::Text => PathFormat::Text,
        }
    }
}

impl Cli {
    /// Zip the repeated project flags back into projects, in the order given
    fn declared_projects(&self) -> Result<Vec<ProjectSpec>, Error> {
        let count = self.project_paths.len();
        if self.group_ids.len() != count || self.names.len() != count {
            return Err(Error::ConfigError(format!(
                "Each --project-path needs a --group-id and a --name (got {} paths, {} group ids, {} names)",
                count,
                self.group_ids.len(),
                self.names.len()
            )));
        }

        Ok(self
            .project_paths
            .iter()
            .zip(&self.group_ids)
            .zip(&self.names)
            .map(|((path, group_id), name)| ProjectSpec::new(path, group_id, name))
            .collect())
    }
}

fn main() -> anyhow::Result<()> {
    // stdout carries the rendered paths, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pathexpander=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ExpandConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_cli_projects(cli.declared_projects()?)
        .with_repository_variable(cli.repo_var.clone());

    let catalog = Expander::from_config(&config)
        .run(&cli.resolve_path)
        .with_context(|| format!("Failed to expand {}", cli.resolve_path.display()))?;

    let style = |dev: bool| PathStyle {
        repository_variable: config.repository_variable.clone(),
        build_output_dir: config.build_output_dir.clone(),
        dev,
    };

    let (renderer, output_file): (Box<dyn Renderer>, Option<PathBuf>) = match cli.command {
        None => (Box::new(ArtifactListing { json: false }), None),
        Some(Commands::List { json }) => (Box::new(ArtifactListing { json }), None),
        Some(Commands::PathFile {
            format,
            dev,
            output_file,
        }) => {
            tracing::debug!("Writing path file (dev: {})", dev);
            (
                Box::new(PathFile {
                    format: format.into(),
                    style: style(dev),
                }),
                output_file,
            )
        }
        Some(Commands::Properties { dev, output_file }) => {
            tracing::debug!("Writing properties file (dev: {})", dev);
            (Box::new(PropertiesFile::new(style(dev))), output_file)
        }
    };

    Exporter::write(renderer.as_ref(), &catalog, output_file.as_deref())
        .context("Failed to write output")?;

    Ok(())
}
