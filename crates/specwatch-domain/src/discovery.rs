//! Discovery results: where a spec lives and how far to trust that answer

use crate::format::SpecFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Qualitative trust level attached to a discovered download location
///
/// Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Needs manual review before use
    Low,
    /// Good enough to download
    Medium,
    /// Good enough to download and to cache across runs
    High,
}

impl Confidence {
    /// Whether a result with this confidence may be downloaded automatically
    pub fn is_actionable(&self) -> bool {
        *self >= Confidence::Medium
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a vendor versions its published spec
///
/// Labels outside the known set are kept as [`VersioningStrategy::Other`] and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VersioningStrategy {
    /// Version follows the repository release tag
    ReleaseTag,
    /// Version is encoded in the file name or path
    FileBased,
    /// Version is read from `info.version` inside the spec
    InSpec,
    /// Explicitly not known
    Unknown,
    /// Any other label
    Other(String),
}

impl VersioningStrategy {
    /// Get string representation
    pub fn as_str(&self) -> &str {
        match self {
            VersioningStrategy::ReleaseTag => "release-tag",
            VersioningStrategy::FileBased => "file-based",
            VersioningStrategy::InSpec => "in-spec",
            VersioningStrategy::Unknown => "unknown",
            VersioningStrategy::Other(label) => label,
        }
    }
}

impl From<String> for VersioningStrategy {
    fn from(label: String) -> Self {
        match label.as_str() {
            "release-tag" => VersioningStrategy::ReleaseTag,
            "file-based" => VersioningStrategy::FileBased,
            "in-spec" => VersioningStrategy::InSpec,
            "unknown" => VersioningStrategy::Unknown,
            _ => VersioningStrategy::Other(label),
        }
    }
}

impl From<VersioningStrategy> for String {
    fn from(strategy: VersioningStrategy) -> Self {
        match strategy {
            VersioningStrategy::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for VersioningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured-source hint returned alongside a discovery result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubInfo {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Path of the spec inside the repository
    pub path: String,
    /// Unmodelled fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GitHubInfo {
    /// Create a repository hint
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            path: path.into(),
            extra: Map::new(),
        }
    }
}

/// Input to a discovery service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRequest {
    /// Vendor id
    pub vendor: String,
    /// API id
    pub api: String,
    /// Documentation page to analyse
    pub documentation_url: String,
    /// Free-form hints about where to look
    pub hints: Vec<String>,
}

/// Outcome of resolving where and what to download
///
/// Optional fields absent on input stay absent on output, and unmodelled
/// fields land in `extra`, so cached findings survive a registry rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    /// Direct download URL of the spec
    pub download_url: String,

    /// Version detected by the resolver, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Content format label (`yaml` or `json`); YAML when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Versioning strategy used by the vendor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioning_strategy: Option<VersioningStrategy>,

    /// Structured-source hint, when the spec lives in a repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_info: Option<GitHubInfo>,

    /// Trust level of this result
    pub confidence: Confidence,

    /// Human-readable explanation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reasoning: String,

    /// Unmodelled fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DiscoveryResult {
    /// Create a result with the given URL and confidence and nothing else set
    pub fn new(download_url: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            download_url: download_url.into(),
            version: None,
            format: None,
            versioning_strategy: None,
            github_info: None,
            confidence,
            reasoning: String::new(),
            extra: Map::new(),
        }
    }

    /// Parsed content format
    pub fn spec_format(&self) -> SpecFormat {
        self.format.as_deref().map(SpecFormat::from_label).unwrap_or(SpecFormat::Yaml)
    }
}
