//! Tests for configuration precedence order

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use taskboard_client::{ConfigError, ConfigLoader};
use tempfile::TempDir;

fn config_dir(root: &TempDir, name: &str) -> PathBuf {
    let dir = root.path().join(name).join(".taskboard");
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_defaults_without_files() {
    let loader = ConfigLoader::with_dirs(None, None);
    let config = loader.load().unwrap();
    assert_eq!(config.base_url, "http://localhost:5000");
    assert_eq!(config.timeout_secs, 30);
    assert!(config.token.is_none());
}

#[test]
#[serial]
fn test_project_file_overrides_global_file() {
    let temp = TempDir::new().unwrap();
    let global = config_dir(&temp, "home");
    let project = config_dir(&temp, "repo");

    fs::write(
        global.join("config.toml"),
        r#"
base_url = "https://global.example.com"
timeout_secs = 10
token = "global-token"
"#,
    )
    .unwrap();
    fs::write(
        project.join("config.yaml"),
        "base_url: https://project.example.com\n",
    )
    .unwrap();

    let loader = ConfigLoader::with_dirs(Some(global), Some(project));
    assert_eq!(loader.discover().len(), 2);

    let config = loader.load().unwrap();
    assert_eq!(config.base_url, "https://project.example.com");
    assert_eq!(config.timeout_secs, 10);
    assert_eq!(config.token.as_deref(), Some("global-token"));
}

#[test]
#[serial]
fn test_json_config() {
    let temp = TempDir::new().unwrap();
    let project = config_dir(&temp, "repo");
    fs::write(
        project.join("config.json"),
        r#"{"user_agent": "board-bot/1.0"}"#,
    )
    .unwrap();

    let config = ConfigLoader::with_dirs(None, Some(project)).load().unwrap();
    assert_eq!(config.user_agent, "board-bot/1.0");
}

#[test]
#[serial]
fn test_environment_overrides_files() {
    let temp = TempDir::new().unwrap();
    let project = config_dir(&temp, "repo");
    fs::write(
        project.join("config.toml"),
        "base_url = \"https://file.example.com\"\ntimeout_secs = 12\n",
    )
    .unwrap();

    std::env::set_var("TASKBOARD_BASE_URL", "https://env.example.com");
    std::env::set_var("TASKBOARD_TOKEN", "env-token");

    let result = ConfigLoader::with_dirs(None, Some(project)).load();

    std::env::remove_var("TASKBOARD_BASE_URL");
    std::env::remove_var("TASKBOARD_TOKEN");

    let config = result.unwrap();
    assert_eq!(config.base_url, "https://env.example.com");
    assert_eq!(config.token.as_deref(), Some("env-token"));
    assert_eq!(config.timeout_secs, 12);
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    let temp = TempDir::new().unwrap();
    let project = config_dir(&temp, "repo");
    fs::write(project.join("config.toml"), "timeout_secs = 0\n").unwrap();

    let err = ConfigLoader::with_dirs(None, Some(project)).load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "timeout_secs"));
}

#[test]
#[serial]
fn test_malformed_file_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let project = config_dir(&temp, "repo");
    fs::write(project.join("config.toml"), "timeout_secs = \"soon\"\n").unwrap();

    let err = ConfigLoader::with_dirs(None, Some(project)).load().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
