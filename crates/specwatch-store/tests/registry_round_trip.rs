//! Integration tests for registry load/save cycles

use serde_json::Value;
use specwatch_domain::{Confidence, DiscoveryResult, TrackedEntry};
use specwatch_store::{RegistryError, RegistryManager};
use std::fs;
use tempfile::TempDir;

const REGISTRY: &str = r#"[
  {
    "id": "stripe-payments",
    "vendor": "stripe",
    "api": "payments",
    "name": "Stripe Payments API",
    "discovery_mode": "structured",
    "sources": {
      "github": {
        "owner": "stripe",
        "repo": "openapi",
        "spec_path": "openapi/spec3.yaml",
        "release_asset_name": "openapi.yaml",
        "versioning_strategy": "release-tag",
        "branch": "master"
      }
    },
    "metadata": {
      "base_url": "https://api.stripe.com",
      "documentation_url": "https://stripe.com/docs/api",
      "description": "Payments",
      "tags": ["payments"],
      "owner_team": "billing"
    },
    "version_tracking": {
      "last_known_version": "v1.0.0",
      "last_checked": "2024-06-01T00:00:00Z"
    },
    "schedule": "daily"
  },
  {
    "vendor": "zoom",
    "api": "meetings",
    "discovery_mode": "agent_assisted",
    "sources": {
      "documentation_url": "https://developers.zoom.us/docs/api/"
    },
    "agent_context": {
      "hints": ["Look for the OpenAPI download link"],
      "previous_findings": {
        "download_url": "https://developers.zoom.us/openapi.json",
        "version": "2.0.0",
        "format": "json",
        "versioning_strategy": "in-spec",
        "github_info": null,
        "confidence": "high",
        "reasoning": "Download link in the API reference"
      }
    }
  }
]
"#;

fn manager(dir: &TempDir) -> RegistryManager {
    RegistryManager::new(dir.path().join("registry.json"), dir.path().join("summary.txt"))
}

#[test]
fn test_untouched_registry_round_trips() {
    let dir = TempDir::new().unwrap();
    let registry = manager(&dir);
    fs::write(registry.registry_path(), REGISTRY).unwrap();

    let entries = registry.load().unwrap();
    assert_eq!(entries.len(), 2);
    registry.save(&entries).unwrap();

    let original: Value = serde_json::from_str(REGISTRY).unwrap();
    let written = fs::read_to_string(registry.registry_path()).unwrap();
    assert!(written.ends_with('\n'));
    assert_eq!(serde_json::from_str::<Value>(&written).unwrap(), original);
}

#[test]
fn test_only_updated_field_changes() {
    let dir = TempDir::new().unwrap();
    let registry = manager(&dir);
    fs::write(registry.registry_path(), REGISTRY).unwrap();

    let mut entries = registry.load().unwrap();
    entries[0].set_last_known_version("v1.1.0");
    registry.save(&entries).unwrap();

    let mut expected: Value = serde_json::from_str(REGISTRY).unwrap();
    expected[0]["version_tracking"]["last_known_version"] = Value::from("v1.1.0");
    let written: Value = serde_json::from_str(&fs::read_to_string(registry.registry_path()).unwrap()).unwrap();
    assert_eq!(written, expected);
    assert_eq!(written[0]["version_tracking"]["last_checked"], "2024-06-01T00:00:00Z");
    assert_eq!(written[0]["schedule"], "daily");
}

#[test]
fn test_invalid_entry_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let registry = manager(&dir);
    fs::write(
        registry.registry_path(),
        r#"[
          {"vendor": "stripe", "api": "payments", "sources": {"github": {"owner": "stripe", "repo": "openapi", "spec_path": "spec.yaml"}}},
          {"vendor": "zoom", "api": "meetings", "discovery_mode": "agent_assisted"}
        ]"#,
    )
    .unwrap();

    match registry.load() {
        Err(RegistryError::InvalidEntry { index, key, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(key, "zoom/meetings");
        }
        other => panic!("Expected InvalidEntry, got {:?}", other),
    }
}

#[test]
fn test_legacy_mode_names_are_accepted() {
    let dir = TempDir::new().unwrap();
    let registry = manager(&dir);
    fs::write(
        registry.registry_path(),
        r#"[{"vendor": "acme", "api": "billing", "discovery_mode": "github",
             "sources": {"github": {"owner": "acme", "repo": "specs", "spec_path": "openapi.yaml"}}}]"#,
    )
    .unwrap();

    let entries = registry.load().unwrap();
    assert_eq!(entries[0].mode().as_str(), "structured");
}

const LEGACY_REGISTRY: &str = r#"[
  {
    "vendor": "acme",
    "api": "billing",
    "discovery_mode": "github",
    "sources": {
      "github": {
        "owner": "acme",
        "repo": "specs",
        "spec_path": "openapi.yaml",
        "release_asset_name": null,
        "versioning_strategy": "calendar"
      },
      "documentation_url": "https://acme.dev/docs"
    },
    "metadata": {"tags": []},
    "version_tracking": {"last_known_version": "v3.0.0"},
    "agent_context": {
      "hints": [],
      "previous_findings": {
        "download_url": "https://acme.dev/openapi.yaml",
        "versioning_strategy": "calendar",
        "confidence": "high",
        "verified_at": "2024-01-01",
        "github_info": {"owner": "acme", "repo": "specs", "path": "openapi.yaml", "ref": "main"}
      }
    }
  }
]
"#;

#[test]
fn test_legacy_spellings_and_nulls_survive_save() {
    let dir = TempDir::new().unwrap();
    let registry = manager(&dir);
    fs::write(registry.registry_path(), LEGACY_REGISTRY).unwrap();

    let entries = registry.load().unwrap();
    registry.save(&entries).unwrap();

    let original: Value = serde_json::from_str(LEGACY_REGISTRY).unwrap();
    let written: Value = serde_json::from_str(&fs::read_to_string(registry.registry_path()).unwrap()).unwrap();
    assert_eq!(written, original);
}

#[test]
fn test_version_bump_keeps_legacy_spellings() {
    let dir = TempDir::new().unwrap();
    let registry = manager(&dir);
    fs::write(registry.registry_path(), LEGACY_REGISTRY).unwrap();

    let mut entries = registry.load().unwrap();
    entries[0].set_last_known_version("v3.1.0");
    registry.save(&entries).unwrap();

    let mut expected: Value = serde_json::from_str(LEGACY_REGISTRY).unwrap();
    expected[0]["version_tracking"]["last_known_version"] = Value::from("v3.1.0");
    let written: Value = serde_json::from_str(&fs::read_to_string(registry.registry_path()).unwrap()).unwrap();
    assert_eq!(written, expected);
    assert_eq!(written[0]["discovery_mode"], "github");
    assert!(written[0]["sources"]["github"]["release_asset_name"].is_null());
}

#[test]
fn test_replaced_findings_drop_stale_fields() {
    let dir = TempDir::new().unwrap();
    let registry = manager(&dir);
    fs::write(registry.registry_path(), LEGACY_REGISTRY).unwrap();

    let mut entries = registry.load().unwrap();
    entries[0].cache_findings(DiscoveryResult::new("https://acme.dev/v4/openapi.yaml", Confidence::High));
    registry.save(&entries).unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(registry.registry_path()).unwrap()).unwrap();
    let findings = &written[0]["agent_context"]["previous_findings"];
    assert_eq!(findings["download_url"], "https://acme.dev/v4/openapi.yaml");
    assert!(findings.get("verified_at").is_none());
    assert!(findings.get("github_info").is_none());
    assert_eq!(written[0]["agent_context"]["hints"], serde_json::json!([]));
}

#[test]
fn test_new_entries_are_appended_as_serialized() {
    let dir = TempDir::new().unwrap();
    let registry = manager(&dir);
    fs::write(registry.registry_path(), LEGACY_REGISTRY).unwrap();

    let mut entries = registry.load().unwrap();
    entries.push(TrackedEntry::agent_assisted("zoom", "meetings", "https://developers.zoom.us/docs/api/"));
    registry.save(&entries).unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(registry.registry_path()).unwrap()).unwrap();
    assert_eq!(written[0]["discovery_mode"], "github");
    assert_eq!(written[1]["discovery_mode"], "agent_assisted");
    assert_eq!(registry.load().unwrap().len(), 2);
}
