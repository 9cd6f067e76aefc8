//! Integration tests for configuration loading and validation

use kernel32_bindings::config::{
    default_config, validate_config, Config, ConfigError, ConfigLoader, LibraryConfig,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_full_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("kernel32.toml");
    fs::write(
        &path,
        r#"
            [library]
            name = "kernel32.dll"
            strict = false

            [logging]
            level = "debug"
            show_target = true

            [probe]
            sample_number = "-42.5"
            list_drives = false
        "#,
    )
    .unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    assert!(validate_config(&config).is_ok());
    assert_eq!(
        config.library,
        LibraryConfig {
            name: "kernel32.dll".to_string(),
            strict: false,
        }
    );
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.show_target);
    assert_eq!(config.probe.sample_number, "-42.5");
    assert!(!config.probe.list_drives);
}

#[test]
fn test_empty_file_means_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_defaults_agree_with_config_default() {
    let defaults = default_config();
    let config = Config::default();
    assert_eq!(config.library.name, defaults.library.name);
    assert_eq!(config.library.strict, defaults.library.strict);
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.probe.sample_number, defaults.probe.sample_number);
}

#[test]
fn test_unknown_type_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "[library]\nstrict = \"yes\"\n").unwrap();

    let err = ConfigLoader::new(&path).load().unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

#[test]
fn test_invalid_values_are_caught_by_validator() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("invalid.toml");
    fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

    let config = ConfigLoader::new(&path).load().unwrap();
    let err = validate_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
