//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use schemagen_core::{GeneratorConfig, SchemaGenResult, SchemaKind};
use schemagen_logging::LogLevel;

#[derive(Parser, Debug)]
#[command(name = "schemagen")]
#[command(author, version, about = "Generate code from protobuf or SQL schemas through templates", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off); RUST_LOG takes precedence
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate from `.proto` service definitions
    Proto(GenerateArgs),

    /// Generate from SQL `CREATE TABLE` scripts
    Sql(GenerateArgs),
}

/// Overrides applied on top of the configuration file.
#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    /// Root directory of schema sources
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,

    /// Root directory for generated files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Root directory of `.tpl` templates
    #[arg(long)]
    pub template_dir: Option<PathBuf>,

    /// Project name exposed to templates
    #[arg(long)]
    pub project: Option<String>,

    /// Service name exposed to templates
    #[arg(long)]
    pub service_name: Option<String>,

    /// Package for outputs written directly under the output root
    #[arg(long)]
    pub package: Option<String>,
}

impl GenerateArgs {
    /// Overwrite every field of `config` that was given on the command line.
    pub fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(dir) = &self.schema_dir {
            config.schema_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &self.template_dir {
            config.template_dir = dir.clone();
        }
        if let Some(project) = &self.project {
            config.project = project.clone();
        }
        if let Some(service_name) = &self.service_name {
            config.service_name = service_name.clone();
        }
        if let Some(package) = &self.package {
            config.package = package.clone();
        }
    }
}

impl Cli {
    pub fn kind(&self) -> SchemaKind {
        match self.command {
            Commands::Proto(_) => SchemaKind::Proto,
            Commands::Sql(_) => SchemaKind::Sql,
        }
    }

    fn generate_args(&self) -> &GenerateArgs {
        match &self.command {
            Commands::Proto(args) | Commands::Sql(args) => args,
        }
    }

    /// Defaults, then the config file, then command-line flags.
    pub fn resolve_config(&self) -> SchemaGenResult<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };
        self.generate_args().apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}
