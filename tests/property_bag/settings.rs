//! Settings loaded from TOML and their effect on bags.

use crate::common::*;
use propbag::{Formatting, NullValueHandling, SETTINGS_FILE_NAME};
use tempfile::TempDir;

#[test]
fn settings_file_drives_factory_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE_NAME);
    std::fs::write(
        &path,
        "null_value_handling = \"ignore\"\nformatting = \"indented\"\n",
    )
    .unwrap();

    let settings = SerializerSettings::from_file(&path).unwrap();
    assert_eq!(settings.null_value_handling, NullValueHandling::Ignore);
    assert_eq!(settings.formatting, Formatting::Indented);

    let f = factory_with(settings);
    let b = f.parse(r#"{"a":null,"b":1}"#).unwrap();
    assert_eq!(b.to_json_string().unwrap(), "{\n  \"b\": 1\n}");
}

#[test]
fn default_template_matches_defaults() {
    let from_template = SerializerSettings::from_toml_str(SerializerSettings::default_toml()).unwrap();
    let defaults = SerializerSettings::default();
    assert_eq!(from_template.null_value_handling, defaults.null_value_handling);
    assert_eq!(from_template.date_parse_handling, defaults.date_parse_handling);
    assert_eq!(from_template.formatting, defaults.formatting);
    assert_eq!(from_template.max_depth, defaults.max_depth);
    assert_eq!(from_template.max_array_size, defaults.max_array_size);
}

#[test]
fn bad_settings_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE_NAME);
    std::fs::write(&path, "null_value_handling = 3\n").unwrap();
    let err = SerializerSettings::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn factories_with_different_settings_are_independent() {
    let including = factory();
    let ignoring =
        factory_with(SerializerSettings::default().with_null_value_handling(NullValueHandling::Ignore));

    let a = including.parse(r#"{"x":null}"#).unwrap();
    let b = ignoring.parse(r#"{"x":null}"#).unwrap();
    assert_eq!(a.to_json_string().unwrap(), r#"{"x":null}"#);
    assert_eq!(b.to_json_string().unwrap(), "{}");
    assert_eq!(serde_json::to_string(&b).unwrap(), "{}");
}

#[test]
fn depth_limit_rejects_documents() {
    let f = factory_with(SerializerSettings::default().with_limits(2, 100));
    assert!(f.parse(r#"{"a":{"b":1}}"#).is_ok());
    let err = f.parse(r#"{"a":{"b":{"c":1}}}"#).unwrap_err();
    assert!(matches!(err, Error::Limit(_)));

    let err = f.create([("a", json!({"b": {"c": 1}}))]).unwrap_err();
    assert!(matches!(err, Error::Limit(_)));
}

#[test]
fn array_limit_rejects_documents() {
    let f = factory_with(SerializerSettings::default().with_limits(10, 3));
    assert!(f.create([("a", vec![1, 2, 3])]).is_ok());
    let err = f.create([("a", vec![1, 2, 3, 4])]).unwrap_err();
    assert!(matches!(err, Error::Limit(_)));
}

#[test]
fn non_object_documents_are_rejected() {
    let f = factory();
    assert!(f.parse("[1,2]").unwrap_err().is_invalid_argument());
    assert!(f.parse("\"text\"").unwrap_err().is_invalid_argument());
    assert!(f.parse("{not json").unwrap_err().is_serialization());
}
