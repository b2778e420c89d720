//! Unit tests for configuration loading

use dinner_decider_api::config::{AppConfig, LogFormat};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE_CONFIG: &str = r#"
server:
  host: 127.0.0.1
  port: 9090
database:
  enabled: false
  dbname: fridge
ollama:
  endpoint: http://ollama.internal:11434
  model: llama3
  timeout_secs: 45
logging:
  level: debug
  format: text
cors:
  allowed_origins:
    - http://localhost:3000
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const TOUCHED_VARS: [&str; 6] = [
    "CONFIG_PATH",
    "PORT",
    "OLLAMA_MODEL",
    "OLLAMA_TIMEOUT_SECS",
    "STORAGE_BACKEND",
    "LOG_FORMAT",
];

fn clear_env() {
    for key in TOUCHED_VARS {
        // SAFETY: tests touching the environment are serialized.
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
fn test_yaml_file_is_parsed() {
    let file = write_config(SAMPLE_CONFIG);
    let config = AppConfig::from_yaml_file(file.path()).unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
    assert!(!config.database.enabled);
    assert_eq!(config.database.dbname, "fridge");
    assert_eq!(config.database.port, 5432);
    assert_eq!(config.ollama.model, "llama3");
    assert_eq!(config.ollama.timeout_secs, 45);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
}

#[test]
fn test_partial_yaml_keeps_defaults() {
    let file = write_config("ollama:\n  model: mistral\n");
    let config = AppConfig::from_yaml_file(file.path()).unwrap();

    assert_eq!(config.ollama.model, "mistral");
    assert_eq!(config.ollama.endpoint, "http://localhost:11434");
    assert_eq!(config.server.port, 8080);
    assert!(config.database.enabled);
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let file = write_config("server:\n  port: not-a-port\n");
    assert!(AppConfig::from_yaml_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(AppConfig::from_yaml_file(&dir.path().join("absent.yaml")).is_err());
}

#[test]
#[serial]
fn test_load_applies_environment_over_file() {
    clear_env();
    let file = write_config(SAMPLE_CONFIG);

    // SAFETY: serialized with the other environment tests.
    unsafe {
        std::env::set_var("CONFIG_PATH", file.path());
        std::env::set_var("PORT", "7070");
        std::env::set_var("OLLAMA_MODEL", "gemma");
        std::env::set_var("STORAGE_BACKEND", "postgres");
    }

    let result = AppConfig::load();
    clear_env();
    let config = result.unwrap();

    assert_eq!(config.server.port, 7070);
    assert_eq!(config.ollama.model, "gemma");
    assert_eq!(config.ollama.timeout_secs, 45);
    assert!(config.database.enabled);
}

#[test]
#[serial]
fn test_load_rejects_invalid_environment_values() {
    clear_env();
    let file = write_config(SAMPLE_CONFIG);

    // SAFETY: serialized with the other environment tests.
    unsafe {
        std::env::set_var("CONFIG_PATH", file.path());
        std::env::set_var("OLLAMA_TIMEOUT_SECS", "soon");
    }
    let timeout = AppConfig::load();

    unsafe {
        std::env::remove_var("OLLAMA_TIMEOUT_SECS");
        std::env::set_var("LOG_FORMAT", "xml");
    }
    let format = AppConfig::load();

    clear_env();
    assert!(timeout.is_err());
    assert!(format.is_err());
}
