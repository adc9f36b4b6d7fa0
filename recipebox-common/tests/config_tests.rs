//! Configuration resolution tests
//!
//! Covers the root folder priority order and graceful handling of a missing
//! config file. Tests that touch RECIPEBOX_* environment variables run under
//! `#[serial]` so they do not race each other.

use recipebox_common::config::{
    resolve_config_path, resolve_root_folder, ServiceConfig, TomlConfig, CONFIG_FILE_ENV,
    ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
#[serial]
fn test_env_var_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/from/env");
    let toml_config = TomlConfig {
        root_folder: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };

    let resolved = resolve_root_folder(None, &toml_config);
    env::remove_var(ROOT_FOLDER_ENV);

    assert_eq!(resolved, PathBuf::from("/from/env"));
}

#[test]
#[serial]
fn test_toml_beats_default() {
    env::remove_var(ROOT_FOLDER_ENV);
    let toml_config = TomlConfig {
        root_folder: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };

    assert_eq!(
        resolve_root_folder(None, &toml_config),
        PathBuf::from("/from/toml")
    );
}

#[test]
#[serial]
fn test_default_root_folder_used_without_overrides() {
    env::remove_var(ROOT_FOLDER_ENV);
    let resolved = resolve_root_folder(None, &TomlConfig::default());
    assert!(resolved.to_string_lossy().contains("recipebox"));
}

#[test]
#[serial]
fn test_config_path_from_env() {
    env::set_var(CONFIG_FILE_ENV, "/etc/recipebox/custom.toml");
    let path = resolve_config_path(None);
    env::remove_var(CONFIG_FILE_ENV);

    assert_eq!(path, Some(PathBuf::from("/etc/recipebox/custom.toml")));
    assert_eq!(
        resolve_config_path(Some(Path::new("/cli.toml"))),
        Some(PathBuf::from("/cli.toml"))
    );
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = TomlConfig::load(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_config_file_values_flow_into_service_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        "bind_addr = \"0.0.0.0\"\nport = 9000\nsession_ttl_hours = 12\npage_size = 10\n",
    )
    .unwrap();

    let toml_config = TomlConfig::load(&path).unwrap();
    let config = ServiceConfig::resolve(Some(temp_dir.path()), &toml_config).unwrap();

    assert_eq!(config.bind_addr, "0.0.0.0");
    assert_eq!(config.port, 9000);
    assert_eq!(config.session_ttl_hours, 12);
    assert_eq!(config.page_size, 10);
    assert_eq!(config.root_folder, temp_dir.path());
}

#[test]
fn test_ensure_root_folder_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("a").join("b");
    let config = ServiceConfig::resolve(Some(&root), &TomlConfig::default()).unwrap();

    config.ensure_root_folder().unwrap();
    assert!(root.is_dir());
}

#[test]
fn test_malformed_config_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = [").unwrap();
    assert!(TomlConfig::load(&path).is_err());
}
