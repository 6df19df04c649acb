//! API version extraction from spec content
//!
//! A structured parse is tried first. Partial or malformed documents fall back
//! to a permissive line scan for the `info:` / `version:` shape.

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Recover the `info.version` declared by a spec document.
///
/// Returns `None` when no version can be found.
pub fn extract_api_version(content: &str) -> Option<String> {
    structured_version(content).or_else(|| scan_info_version(content))
}

/// Version derived from a release tag: one leading `v` is stripped
pub fn fallback_version(tag: &str) -> String {
    let tag = tag.trim();
    tag.strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag)
        .to_string()
}

/// Cheap check that a body is an OpenAPI or Swagger document rather than,
/// say, an HTML landing page
pub fn looks_like_openapi(content: &str) -> bool {
    let lower = content.to_ascii_lowercase();
    ["openapi:", "swagger:", "\"openapi\"", "\"swagger\""]
        .iter()
        .any(|keyword| lower.contains(keyword))
}

/// `info.version` from a well-formed document, only when it is a string.
///
/// Non-string scalars are left to the line scan, which keeps the literal text
/// (`version: 1.10` would otherwise come back as `1.1`).
fn structured_version(content: &str) -> Option<String> {
    let version = if content.trim_start().starts_with('{') {
        let doc: JsonValue = serde_json::from_str(content).ok()?;
        doc.pointer("/info/version")?.as_str()?.trim().to_string()
    } else {
        let doc: YamlValue = serde_yaml::from_str(content).ok()?;
        doc.get("info")?.get("version")?.as_str()?.trim().to_string()
    };
    (!version.is_empty()).then_some(version)
}

/// Line scan for `version:` inside a top-level `info:` block
fn scan_info_version(content: &str) -> Option<String> {
    let mut in_info = false;

    for raw in content.lines() {
        let line = raw.trim_end();

        if !in_info {
            in_info = line == "info:";
            continue;
        }

        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.len() == line.len() {
            // Back at column zero: the info block is over
            return None;
        }
        if !trimmed.starts_with("version:") {
            continue;
        }

        let value = trimmed.split_once(':').map(|(_, v)| v.trim()).unwrap_or("");
        let value = strip_quotes(value);
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    None
}

/// Strip one layer of matching enclosing quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
