//! Configuration file loading tests.

#![allow(clippy::unwrap_used)]

use std::io::Write;

use order_engine::config::{ConfigError, load_config};
use order_engine::{EngineSettings, OrderEngine};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_engine_settings_from_file() {
    let file = write_config(
        r"
engine:
  broker_count: 4
  intake_threshold: 3
observability:
  logging:
    format: json
",
    );

    let config = load_config(file.path().to_str()).unwrap();
    let settings: EngineSettings = config.engine.into();
    assert_eq!(settings, EngineSettings::new(4, 3));

    let engine = OrderEngine::new(settings).unwrap();
    assert_eq!(engine.broker_ids().len(), 4);
}

#[test]
fn example_config_loads_with_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.yaml");
    let config = load_config(Some(path)).unwrap();
    assert_eq!(config.engine.to_settings(), EngineSettings::default());
}

#[test]
fn invalid_file_is_rejected() {
    let file = write_config("engine:\n  broker_count: 0\n");
    let err = load_config(file.path().to_str()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = load_config(path.to_str()).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}
