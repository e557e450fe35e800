//! Serde tests for core types.
//!
//! These shapes are what the CLI prints with `--format json` and what the
//! settings file stores, so their field names must stay stable.

use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::{CacheEntry, CacheStats, Domain, IconSize, ProviderKind};

// ============================================================================
// ProviderKind
// ============================================================================

#[test]
fn test_provider_kind_serde_roundtrip_all_variants() {
    for kind in ProviderKind::all() {
        let json = serde_json::to_string(kind).unwrap();
        let deserialized: ProviderKind = serde_json::from_str(&json).unwrap();
        assert_eq!(*kind, deserialized, "Round-trip failed for {:?}", kind);
    }
}

#[test]
fn test_provider_kind_uses_cli_names() {
    for kind in ProviderKind::all() {
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json, json!(kind.cli_name()));
        assert_eq!(ProviderKind::from_cli_name(kind.cli_name()), Some(*kind));
    }
}

#[test]
fn test_provider_kind_invalid_deserialize() {
    let result: Result<ProviderKind, _> = serde_json::from_str(r#""bing""#);
    assert!(result.is_err());
}

// ============================================================================
// Cache types
// ============================================================================

#[test]
fn test_cache_stats_camel_case() {
    let stats = CacheStats {
        cached_domains: 3,
        failed_domains: 1,
        total_requests: 9,
    };
    let value = serde_json::to_value(stats).unwrap();
    assert_eq!(
        value,
        json!({"cachedDomains": 3, "failedDomains": 1, "totalRequests": 9})
    );
}

#[test]
fn test_cache_entry_fields() {
    let stored = Utc.with_ymd_and_hms(2024, 5, 4, 3, 2, 1).unwrap();
    let entry = CacheEntry::new("https://icons.example/x.png", stored);
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["iconUrl"], "https://icons.example/x.png");
    assert!(value["storedAt"].as_str().unwrap().starts_with("2024-05-04T03:02:01"));
}

// ============================================================================
// Lookup keys
// ============================================================================

#[test]
fn test_domain_is_transparent() {
    let domain = Domain::new("example.com");
    assert_eq!(serde_json::to_value(&domain).unwrap(), json!("example.com"));
}

#[test]
fn test_icon_size_rejects_zero_on_deserialize() {
    assert!(serde_json::from_str::<IconSize>("0").is_err());
    assert_eq!(serde_json::from_str::<IconSize>("24").unwrap().pixels(), 24);
}
