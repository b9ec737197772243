//! Tests for schema parsing.

use std::io::Write;

use classet_model::{ClassError, GroupKey, Schema, SchemaEntry};
use tempfile::NamedTempFile;

fn schema_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{json}").unwrap();
    file
}

#[test]
fn parses_sequence_shape_in_declaration_order() {
    let schema = Schema::from_json_str(
        r#"[
            {"name": "b", "group": "default"},
            {"name": "a", "group": null},
            {"name": "d", "group": 1}
        ]"#,
    )
    .expect("parse schema");

    let names: Vec<&str> = schema.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "d"]);
    assert_eq!(schema.entries()[0].group, GroupKey::Default);
    assert_eq!(schema.entries()[1].group, GroupKey::Ungrouped);
    assert_eq!(schema.entries()[2].group, GroupKey::Index(1));
}

#[test]
fn missing_group_means_ungrouped() {
    let schema = Schema::from_json_str(r#"[{"name": "c"}]"#).expect("parse schema");
    assert_eq!(schema.entries()[0], SchemaEntry::new("c", GroupKey::Ungrouped));
}

#[test]
fn parses_mapping_shape_alphabetically() {
    let schema =
        Schema::from_json_str(r#"{"e": 1, "a": "default", "c": null}"#).expect("parse schema");

    let names: Vec<&str> = schema.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c", "e"]);
    assert_eq!(schema.entries()[2].group, GroupKey::Index(1));
}

#[test]
fn rejects_invalid_schema_json() {
    let err = Schema::from_json_str(r#"[{"name": "a", "group": true}]"#).unwrap_err();
    assert!(matches!(err, ClassError::Json(_)));
}

#[test]
fn builder_matches_parsed_schema() {
    let built = Schema::new()
        .with("a", "default")
        .with("c", None::<&str>)
        .with("d", 1);
    let parsed = Schema::from_json_str(
        r#"[{"name": "a", "group": "default"}, {"name": "c", "group": null}, {"name": "d", "group": 1}]"#,
    )
    .expect("parse schema");
    assert_eq!(built, parsed);
}

#[test]
fn schema_serializes_as_sequence() {
    let schema: Schema = [("a", GroupKey::Default), ("d", GroupKey::Index(1))]
        .into_iter()
        .collect();
    let json = serde_json::to_string(&schema).expect("serialize schema");
    assert_eq!(
        json,
        r#"[{"name":"a","group":"default"},{"name":"d","group":1}]"#
    );
}

#[test]
fn reads_schema_from_file() {
    let file = schema_file(r#"[{"name": "a", "group": "default"}]"#);

    let schema = Schema::from_path(file.path()).expect("read schema");
    assert_eq!(schema.len(), 1);
}

#[test]
fn bad_group_value_reports_expected_group_key() {
    let err = Schema::from_json_str(r#"[{"name": "a", "group": true}]"#).unwrap_err();
    let message = err.to_string();
    assert!(
        message.contains("expected null, a string, or an integer group key"),
        "{message}"
    );
}

#[test]
fn bad_group_value_in_mapping_reports_expected_group_key() {
    let err = Schema::from_json_str(r#"{"a": 1.5}"#).unwrap_err();
    assert!(err.to_string().contains("group key"), "{err}");
}

#[test]
fn scalar_schema_is_rejected() {
    let err = Schema::from_json_str("42").unwrap_err();
    assert!(err.to_string().contains("a list of {name, group} records"), "{err}");
}

#[test]
fn missing_schema_file_is_io_error() {
    let err = Schema::from_path(std::path::Path::new("/nonexistent/classet/schema.json"))
        .unwrap_err();
    assert!(matches!(err, ClassError::Io(_)));
}
