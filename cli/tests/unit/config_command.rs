//! Unit tests for `medcompare config set` persistence.
//!
//! Each test pins the store to its own temp file, so no environment
//! variables are touched.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use medcompare_cli::application::ports::ConfigStore;
use medcompare_cli::application::services::config_service::{load_config, set_value};
use medcompare_cli::domain::config::{DEFAULT_PORT, MedcompareConfig};
use medcompare_cli::domain::error::ConfigError;
use medcompare_cli::infra::config::YamlConfigStore;
use tempfile::TempDir;

fn store() -> (TempDir, YamlConfigStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = YamlConfigStore::at(dir.path().join("config.yaml"));
    (dir, store)
}

#[test]
fn test_missing_file_loads_defaults() {
    let (_dir, store) = store();
    assert_eq!(load_config(&store).unwrap(), MedcompareConfig::default());
}

#[test]
fn test_set_port_persists_across_loads() {
    let (_dir, store) = store();
    let updated = set_value(&store, "bootstrap.port", "8080").expect("set port");
    assert_eq!(updated.bootstrap.port, 8080);
    assert_eq!(store.load().unwrap().bootstrap.port, 8080);
}

#[test]
fn test_set_env_dir_keeps_other_values() {
    let (_dir, store) = store();
    set_value(&store, "bootstrap.port", "8080").unwrap();
    set_value(&store, "bootstrap.env_dir", ".venv").unwrap();

    let config = store.load().unwrap();
    assert_eq!(config.bootstrap.env_dir, PathBuf::from(".venv"));
    assert_eq!(config.bootstrap.port, 8080);
}

#[test]
fn test_set_data_dir() {
    let (_dir, store) = store();
    set_value(&store, "data.dir", "/srv/catalog").unwrap();
    assert_eq!(store.load().unwrap().data.dir, PathBuf::from("/srv/catalog"));
}

#[test]
fn test_unknown_key_is_rejected_and_nothing_written() {
    let (_dir, store) = store();
    let err = set_value(&store, "bootstrap.python", "python3.12").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownKey { .. })
    ));
    assert!(!store.path().unwrap().exists());
}

#[test]
fn test_invalid_port_is_rejected_and_previous_value_kept() {
    let (_dir, store) = store();
    for bad in ["0", "70000", "http"] {
        let err = set_value(&store, "bootstrap.port", bad).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::InvalidValue { .. })
            ),
            "{bad} should be an invalid value"
        );
    }
    assert_eq!(load_config(&store).unwrap().bootstrap.port, DEFAULT_PORT);
}

#[test]
fn test_blank_env_dir_is_rejected() {
    let (_dir, store) = store();
    assert!(set_value(&store, "bootstrap.env_dir", "  ").is_err());
}

#[cfg(unix)]
#[test]
fn test_saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store) = store();
    set_value(&store, "bootstrap.port", "5001").unwrap();
    let mode = std::fs::metadata(store.path().unwrap())
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
