//! Integration tests for vnl-config crate.

use std::fs;
use tempfile::TempDir;
use vnl_config::{Config, ConfigLoader};

#[test]
fn test_default_config_validation() {
    let config = Config::default();
    assert!(config.validate_all().is_ok());

    // Saving is opt-in
    assert!(!config.output.save);
    assert_eq!(config.figure.title, "Player Statistics Analysis");
}

#[test]
fn test_load_from_file_round_trips_through_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vnl-infographic.yaml");

    let mut config = Config::default();
    config.figure.dpi = 200;
    config.charts.top_countries = 5;
    config.output.summary_path = Some("summary.json".to_string());
    fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();

    let loaded = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(loaded.figure.dpi, 200);
    assert_eq!(loaded.charts.top_countries, 5);
    assert_eq!(loaded.output.summary_path.as_deref(), Some("summary.json"));
}

#[test]
fn test_invalid_file_surfaces_as_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "logging:\n  level: chatty\n").unwrap();

    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(err, vnl_common::VnlError::Config { .. }));
}
