//! Error types for schemagen

use std::path::PathBuf;

use schemagen_schema::ParseError;
use thiserror::Error;

/// Result type alias for schemagen operations
pub type SchemaGenResult<T> = Result<T, SchemaGenError>;

/// Error type for schemagen operations
#[derive(Error, Debug)]
pub enum SchemaGenError {
    /// A schema source did not match the expected grammar
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// File system failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaGenError {
    pub fn parse(path: impl Into<PathBuf>, source: ParseError) -> Self {
        SchemaGenError::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SchemaGenError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for SchemaGenError {
    fn from(err: toml::de::Error) -> Self {
        SchemaGenError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn SchemaGenError___parse___displays_path_and_position() {
        let err = SchemaGenError::parse("proto/user.proto", ParseError::new(3, 7, "expected \";\""));

        assert_eq!(
            err.to_string(),
            "failed to parse proto/user.proto: 3:7: expected \";\""
        );
    }

    #[test]
    fn SchemaGenError___parse___exposes_source() {
        let err = SchemaGenError::parse("a.proto", ParseError::new(1, 1, "boom"));

        let source = std::error::Error::source(&err).map(|s| s.to_string());

        assert_eq!(source.as_deref(), Some("1:1: boom"));
    }

    #[test]
    fn SchemaGenError___from_toml___becomes_config_error() {
        let toml_err = toml::from_str::<toml::Table>("= broken").unwrap_err();

        let err = SchemaGenError::from(toml_err);

        assert!(matches!(err, SchemaGenError::Config(_)));
    }
}
