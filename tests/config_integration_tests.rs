//! Integration tests for config loading from fixture files.
//!
//! These tests verify that the sample config file matches the options the tool reads.

use std::fs;
use std::path::Path;

/// Read the sample config file content.
fn read_sample_config() -> String {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    fs::read_to_string(config_path).expect("Failed to read sample config file")
}

#[test]
fn sample_config_file_exists() {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    assert!(config_path.exists(), "Sample config file should exist");
}

#[test]
fn sample_config_is_valid_toml() {
    let config_content = read_sample_config();
    let result: Result<toml::Value, _> = toml::from_str(&config_content);
    assert!(result.is_ok(), "Sample config should be valid TOML: {:?}", result.err());
}

#[test]
fn subrename_section_has_expected_structure() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");

    let subrename = value.get("subrename").expect("should have subrename section");

    for key in ["debug", "execute", "verbose"] {
        let option = subrename.get(key);
        assert!(option.is_some(), "subrename section should have '{key}'");
        assert!(option.unwrap().is_bool(), "'{key}' should be a boolean");
    }
}

#[test]
fn sample_config_defaults_to_preview() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");

    let execute = value
        .get("subrename")
        .and_then(|section| section.get("execute"))
        .and_then(toml::Value::as_bool);
    assert_eq!(execute, Some(false));
}

#[test]
fn config_path_points_to_project_toml() {
    if let Some(path) = subtitle_rename::config_path() {
        assert!(path.ends_with(".config/subtitle-rename.toml"));
    }
}
