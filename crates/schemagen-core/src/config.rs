//! Run configuration

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SchemaGenError, SchemaGenResult};

/// Extension of template files, without the dot.
pub const TEMPLATE_EXTENSION: &str = "tpl";

/// Which schema reader feeds the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// `.proto` IDL files
    Proto,
    /// SQL `CREATE TABLE` scripts
    Sql,
}

impl SchemaKind {
    /// Extension of source files for this kind, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            SchemaKind::Proto => "proto",
            SchemaKind::Sql => "sql",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Generator configuration, loadable from TOML
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Root of the schema source tree
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Root under which generated files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Root of the template tree
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Project name exposed to templates
    #[serde(default = "default_project")]
    pub project: String,

    /// Service name exposed to templates
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Package for outputs whose destination directory has no name
    #[serde(default)]
    pub package: String,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("proto")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("gen")
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_project() -> String {
    "app".to_string()
}

fn default_service_name() -> String {
    "platform".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            output_dir: default_output_dir(),
            template_dir: default_template_dir(),
            project: default_project(),
            service_name: default_service_name(),
            package: String::new(),
            log_level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text. Empty input yields defaults.
    pub fn from_toml_str(source: &str) -> SchemaGenResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: &Path) -> SchemaGenResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| SchemaGenError::io(path, e))?;
        Self::from_toml_str(&source)
    }

    /// Reject empty directory settings.
    pub fn validate(&self) -> SchemaGenResult<()> {
        let dirs = [
            ("schema_dir", &self.schema_dir),
            ("output_dir", &self.output_dir),
            ("template_dir", &self.template_dir),
        ];
        for (name, dir) in dirs {
            if dir.as_os_str().is_empty() {
                return Err(SchemaGenError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
