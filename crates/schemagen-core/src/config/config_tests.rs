#![allow(non_snake_case)]

use super::*;
use std::io::Write;
use test_case::test_case;

#[test]
fn GeneratorConfig___default___has_expected_values() {
    let config = GeneratorConfig::default();

    assert_eq!(config.schema_dir, PathBuf::from("proto"));
    assert_eq!(config.output_dir, PathBuf::from("gen"));
    assert_eq!(config.template_dir, PathBuf::from("templates"));
    assert_eq!(config.project, "app");
    assert_eq!(config.service_name, "platform");
    assert!(config.package.is_empty());
    assert_eq!(config.log_level, "info");
}

#[test]
fn GeneratorConfig___from_empty_toml___returns_defaults() {
    let config = GeneratorConfig::from_toml_str("").unwrap();

    assert_eq!(config, GeneratorConfig::default());
}

#[test]
fn GeneratorConfig___from_toml___overrides_given_fields() {
    let source = r#"
        schema_dir = "schema/sql"
        project = "appstore"
    "#;

    let config = GeneratorConfig::from_toml_str(source).unwrap();

    assert_eq!(config.schema_dir, PathBuf::from("schema/sql"));
    assert_eq!(config.project, "appstore");
    assert_eq!(config.output_dir, PathBuf::from("gen"));
}

#[test_case(r#"schema_dir = """# ; "empty schema dir")]
#[test_case(r#"output_dir = """# ; "empty output dir")]
#[test_case(r#"template_dir = """# ; "empty template dir")]
fn GeneratorConfig___empty_directory___is_rejected(source: &str) {
    let err = GeneratorConfig::from_toml_str(source).unwrap_err();

    assert!(matches!(err, SchemaGenError::Config(_)));
}

#[test]
fn GeneratorConfig___malformed_toml___is_config_error() {
    let err = GeneratorConfig::from_toml_str("project = ").unwrap_err();

    assert!(matches!(err, SchemaGenError::Config(_)));
}

#[test]
fn GeneratorConfig___from_file___reads_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "service_name = \"billing\"").unwrap();

    let config = GeneratorConfig::from_file(file.path()).unwrap();

    assert_eq!(config.service_name, "billing");
}

#[test]
fn GeneratorConfig___from_missing_file___is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = GeneratorConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();

    assert!(matches!(err, SchemaGenError::Io { .. }));
}

#[test_case(SchemaKind::Proto, "proto")]
#[test_case(SchemaKind::Sql, "sql")]
fn SchemaKind___extension___matches_source_files(kind: SchemaKind, expected: &str) {
    assert_eq!(kind.extension(), expected);
    assert_eq!(kind.to_string(), expected);
}
