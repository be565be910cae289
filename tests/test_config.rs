// Configuration tests
// Author: Gabriel Demetrios Lafis

use std::io::Write;

use rust_data_explorer::utils::Config;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.backend.base_url, "http://localhost:8080");
    assert_eq!(config.query.page_size, 25);
    assert_eq!(config.query.search_debounce_ms, 500);
    assert_eq!(config.log_level_filter(), log::LevelFilter::Info);
}

#[test]
fn test_load_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("explorer.json");

    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{
            "backend": {{"base_url": "http://data.internal:9000", "timeout_secs": 5}},
            "query": {{"page_size": 50, "search_debounce_ms": 250}},
            "logging": {{"level": "debug", "file": null}}
        }}"#
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.backend.base_url, "http://data.internal:9000");
    assert_eq!(config.query.page_size, 50);
    assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
}

#[test]
fn test_load_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("explorer.yaml");

    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        "backend:\n  base_url: http://data.internal:9000\n  timeout_secs: 5\nquery:\n  page_size: 100\n  search_debounce_ms: 250\nlogging:\n  level: warn\n  file: ~\n"
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.query.page_size, 100);
    assert_eq!(config.log_level_filter(), log::LevelFilter::Warn);
}

#[test]
fn test_module_errors_roll_up_into_app_error() {
    use rust_data_explorer::session::SessionError;
    use rust_data_explorer::utils::AppError;

    let err = AppError::from(SessionError::NoModelSelected);
    assert_eq!(err.to_string(), "session error: no model selected");
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("explorer.toml");
    std::fs::write(&path, "page_size = 50").unwrap();

    assert!(Config::from_file(&path).is_err());
}
