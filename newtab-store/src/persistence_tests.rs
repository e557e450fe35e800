//! Persistence round-trip and edge case tests.

use std::path::PathBuf;
use tempfile::TempDir;

use crate::error::StoreError;
use crate::persistence::{ensure_dir, load_json, load_json_or_default, save_json};
use crate::settings_store::{LogLevel, Settings, SettingsStore};
use newtab_core::ProviderKind;

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("settings.json");

    save_json(&nested_path, &Settings::default()).await.unwrap();
    assert!(nested_path.exists());
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let file_path = PathBuf::from("/nonexistent/path/settings.json");

    let result: Result<Settings, _> = load_json(&file_path).await;
    assert!(result.is_err());

    let fallback: Settings = load_json_or_default(&file_path).await;
    assert_eq!(fallback, Settings::default());
}

#[tokio::test]
async fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir_path = temp_dir.path().join("config");

    ensure_dir(&dir_path).await.unwrap();
    ensure_dir(&dir_path).await.unwrap();

    assert!(dir_path.is_dir());
}

// ============================================================================
// Settings Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_settings_full_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");

    let settings = Settings {
        icon_size: 64,
        cache_ttl_secs: 3600,
        cache_capacity: 50,
        batch_size: 2,
        batch_delay_ms: 250,
        probe_timeout_secs: 3,
        probe_retries: 1,
        providers: vec![ProviderKind::Direct, ProviderKind::Google],
        log_level: LogLevel::Debug,
    };

    save_json(&file_path, &settings).await.unwrap();
    let loaded: Settings = load_json(&file_path).await.unwrap();

    assert_eq!(loaded, settings);
}

#[tokio::test]
async fn test_provider_names_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");

    save_json(&file_path, &Settings::default()).await.unwrap();
    let raw = tokio::fs::read_to_string(&file_path).await.unwrap();

    assert!(raw.contains("\"duckduckgo\""));
    assert!(raw.contains("\"google_small\""));
}

#[tokio::test]
async fn test_load_minimal_json_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("minimal.json");
    tokio::fs::write(&file_path, r#"{"batch_size": 9}"#).await.unwrap();

    let loaded: Settings = load_json(&file_path).await.unwrap();

    assert_eq!(loaded.batch_size, 9);
    assert_eq!(loaded.icon_size, 32);
    assert_eq!(loaded.providers, ProviderKind::all().to_vec());
}

#[tokio::test]
async fn test_load_json_with_unknown_fields() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("extra_fields.json");
    let json = r#"{
        "icon_size": 48,
        "theme": "dark",
        "nested_unknown": {"key": "value"}
    }"#;
    tokio::fs::write(&file_path, json).await.unwrap();

    let loaded: Settings = load_json(&file_path).await.unwrap();
    assert_eq!(loaded.icon_size, 48);
}

// ============================================================================
// Settings Store Tests
// ============================================================================

#[tokio::test]
async fn test_store_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("newtab").join("settings.json");

    let store = SettingsStore::load(file_path.clone()).await.unwrap();
    store.set_value("batch_delay_ms", "300").await.unwrap();
    store.save().await.unwrap();

    let reloaded = SettingsStore::load(file_path).await.unwrap();
    assert_eq!(reloaded.get().await.batch_delay_ms, 300);
}

#[tokio::test]
async fn test_store_corrupt_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");
    tokio::fs::write(&file_path, "{ not json").await.unwrap();

    let err = SettingsStore::load(file_path).await.err().unwrap();
    assert!(matches!(err, StoreError::Serialization(_)));
}

#[tokio::test]
async fn test_store_rejects_invalid_values_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");

    for json in [
        r#"{"icon_size": 0}"#,
        r#"{"cache_ttl_secs": 0}"#,
        r#"{"providers": []}"#,
    ] {
        tokio::fs::write(&file_path, json).await.unwrap();
        let err = SettingsStore::load(file_path.clone()).await.err().unwrap();
        assert!(err.is_config_error(), "accepted {json}");
    }
}

#[tokio::test]
async fn test_store_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("absent.json");

    let store = SettingsStore::load(file_path).await.unwrap();
    assert_eq!(store.get().await, Settings::default());
}
