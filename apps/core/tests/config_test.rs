use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use dirhop_core::config::{self, Config, ConfigError};

fn unique_temp_path(label: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "dirhop-{label}-{}-{unique}",
        std::process::id()
    ))
}

#[test]
fn accepts_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.max_depth, 2);
    assert_eq!(cfg.app_choice, "vscode");
    assert!(!cfg.include_hidden);
    assert!(cfg.store_db_path.to_string_lossy().contains("dirhop"));
    assert!(cfg.config_path.to_string_lossy().contains("dirhop"));
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn rejects_max_depth_out_of_range() {
    let shallow = Config {
        max_depth: 0,
        ..Default::default()
    };
    let deep = Config {
        max_depth: 11,
        ..Default::default()
    };
    assert!(config::validate(&shallow).is_err());
    assert!(config::validate(&deep).is_err());
}

#[test]
fn rejects_unknown_app_choice() {
    let cfg = Config {
        app_choice: "notepad".to_string(),
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn custom_app_choice_requires_a_path() {
    let mut cfg = Config {
        app_choice: "custom".to_string(),
        custom_app_path: Some("   ".to_string()),
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());

    cfg.custom_app_path = Some("/Applications/Nova.app".to_string());
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn missing_config_file_yields_defaults() {
    let path = unique_temp_path("missing-config").join("config.toml");
    let cfg = config::load(Some(&path)).unwrap();

    assert_eq!(cfg.config_path, path);
    assert_eq!(cfg.max_depth, 2);
    assert!(!path.exists());
}

#[test]
fn saved_config_loads_back() {
    let dir = unique_temp_path("config-roundtrip");
    let cfg = Config {
        workspace_path: dir.join("workspace"),
        max_depth: 4,
        app_choice: "zed".to_string(),
        include_hidden: true,
        store_db_path: dir.join("store.sqlite3"),
        config_path: dir.join("config.toml"),
        ..Default::default()
    };

    config::save(&cfg).unwrap();
    let loaded = config::load(Some(&cfg.config_path)).unwrap();

    assert_eq!(loaded, cfg);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn partial_config_file_fills_in_defaults() {
    let dir = unique_temp_path("config-partial");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "workspace_path = \"/srv/code\"\napp_choice = \"cursor\"\n").unwrap();

    let cfg = config::load(Some(&path)).unwrap();

    assert_eq!(cfg.workspace_path, PathBuf::from("/srv/code"));
    assert_eq!(cfg.app_choice, "cursor");
    assert_eq!(cfg.max_depth, 2);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn malformed_config_file_is_an_error() {
    let dir = unique_temp_path("config-malformed");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "max_depth = \"deep\"").unwrap();

    let result = config::load(Some(&path));

    assert!(matches!(result, Err(ConfigError::Parse(_))));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn invalid_values_in_config_file_are_rejected() {
    let dir = unique_temp_path("config-invalid");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "max_depth = 40").unwrap();

    let result = config::load(Some(&path));

    assert!(matches!(result, Err(ConfigError::Invalid(_))));
    std::fs::remove_dir_all(&dir).unwrap();
}
