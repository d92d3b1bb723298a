//! Integration tests for placeholder interpolation.

use std::collections::HashMap;
use std::fs;

use chrono::NaiveDate;
use jfl_template::{
    impl_attributes, interpolate, record, EngineConfig, FormatError, Interpolator, NameMatching,
    NullPolicy, Serialized, TemplateError, Value, WithVar,
};
use serde::Serialize;
use serde_json::json;
use tempfile::tempdir;

struct Invoice {
    number: u32,
    customer: String,
    total: f64,
    issued: NaiveDate,
    note: Option<String>,
}

impl_attributes!(Invoice {
    number,
    customer,
    total,
    issued,
    note,
});

fn invoice() -> Invoice {
    Invoice {
        number: 42,
        customer: "Acme".to_string(),
        total: 1234.5,
        issued: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        note: None,
    }
}

#[test]
fn test_struct_attributes() {
    let text = "Invoice {number:D6} for {customer}: {total:N2} on {issued:yyyy-MM-dd} {note}"
        .with_var(&invoice())
        .unwrap();
    assert_eq!(text, "Invoice 000042 for Acme: 1,234.50 on 2024-02-29 {note}");
}

#[test]
fn test_serialized_struct() {
    #[derive(Serialize)]
    struct Query<'a> {
        table: &'a str,
        limit: usize,
    }

    let record = Serialized::new(&Query {
        table: "users",
        limit: 50,
    })
    .unwrap();
    let text = interpolate("select * from {table} limit {limit:000}", &record).unwrap();
    assert_eq!(text, "select * from users limit 050");
}

#[test]
fn test_json_record() {
    let record = json!({ "user": { "id": 1 }, "ratio": 0.125, "active": true });
    let text = interpolate("{user} {ratio:P1} {active}", &record).unwrap();
    assert_eq!(text, r#"{"id":1} 12.5 % True"#);
}

#[test]
fn test_hash_map_record() {
    let mut vars = HashMap::new();
    vars.insert("greeting".to_string(), Value::from("Hello"));
    vars.insert("name".to_string(), Value::from("World"));
    assert_eq!(interpolate("{greeting}, {name}!", &vars).unwrap(), "Hello, World!");
}

#[test]
fn test_format_error_stops_interpolation() {
    let err = "{total:D}".with_var(&invoice()).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Format(FormatError::InvalidSpecifier { kind: "float", .. })
    ));
}

#[test]
fn test_legacy_preset() {
    let engine = Interpolator::new(EngineConfig::legacy());
    let text = engine.interpolate("{note}|{customer}", &invoice()).unwrap();
    assert_eq!(text, "|Acme");
}

#[test]
fn test_config_from_yaml_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("engine.yaml");
    fs::write(&path, "name_matching: legacy\nnull_policy: empty\n").unwrap();

    let config = EngineConfig::from_file(&path).unwrap();
    assert_eq!(config, EngineConfig::legacy());
}

#[test]
fn test_config_from_toml_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("engine.toml");
    fs::write(&path, "name_matching = \"escaped\"\n").unwrap();

    let config = EngineConfig::from_file(&path).unwrap();
    assert_eq!(config.name_matching, NameMatching::Escaped);
    assert_eq!(config.null_policy, NullPolicy::KeepToken);
}

#[test]
fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    let err = EngineConfig::from_file(&dir.path().join("absent.yml")).unwrap_err();
    assert!(matches!(err, TemplateError::Io(_)));
}

#[test]
fn test_positional_alias() {
    let text = "{0} of {1:P0}".with(&[Value::from(3), Value::from(0.75)]).unwrap();
    assert_eq!(text, "3 of 75 %");
}

#[test]
fn test_record_macro_shorthand() {
    let count = 10;
    let message = "{count:00000} Rows Deleted!".with_var(&record! { count }).unwrap();
    assert_eq!(message, "00010 Rows Deleted!");
}
