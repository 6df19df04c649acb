//! Tracked registry entries
//!
//! A [`TrackedEntry`] is one vendor/API pair in the registry document. Fields
//! this crate does not model are captured in flattened `extra` maps so a
//! load → save cycle leaves them untouched.

use crate::discovery::{DiscoveryResult, VersioningStrategy};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Strategy used to locate a tracked entry's spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    /// Release lookups against a configured owner/repo/path
    #[serde(alias = "github")]
    Structured,
    /// External discovery service driven by a documentation URL
    #[serde(alias = "agent")]
    AgentAssisted,
    /// Structured first, discovery service as the fallback
    Hybrid,
}

impl DiscoveryMode {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMode::Structured => "structured",
            DiscoveryMode::AgentAssisted => "agent_assisted",
            DiscoveryMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured source: a spec file versioned by repository releases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubSource {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Path of the spec file inside the repository
    pub spec_path: String,
    /// Release asset carrying the spec, preferred over the raw path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_asset_name: Option<String>,
    /// How the upstream versions the spec
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioning_strategy: Option<VersioningStrategy>,
    /// Unmodelled fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GitHubSource {
    /// Create a source without a release asset
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, spec_path: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            spec_path: spec_path.into(),
            release_asset_name: None,
            versioning_strategy: None,
            extra: Map::new(),
        }
    }

    /// Set the release asset name
    pub fn with_asset(mut self, name: impl Into<String>) -> Self {
        self.release_asset_name = Some(name.into());
        self
    }
}

/// Where an entry's spec can be found
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sources {
    /// Structured repository source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubSource>,
    /// Documentation page for agent-assisted discovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    /// Unmodelled fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Descriptive metadata copied into the archive sidecar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Human-facing documentation URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tag set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Unmodelled fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntryMetadata {
    fn is_empty(&self) -> bool {
        self.base_url.is_none()
            && self.documentation_url.is_none()
            && self.description.is_none()
            && self.tags.is_empty()
            && self.extra.is_empty()
    }
}

/// Last-known upstream version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionTracking {
    /// Release tag (structured) or API version (agent-assisted) seen last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_known_version: Option<String>,
    /// API version archived last by a hybrid entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_api_version: Option<String>,
    /// Unmodelled fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VersionTracking {
    fn is_empty(&self) -> bool {
        self.last_known_version.is_none() && self.last_api_version.is_none() && self.extra.is_empty()
    }
}

/// Inputs and cached output of agent-assisted discovery
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentContext {
    /// Hints forwarded to the discovery service
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    /// Last accepted discovery result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_findings: Option<DiscoveryResult>,
    /// Unmodelled fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One monitored API source in the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntry {
    /// Registry identifier (conventionally `<vendor>-<api>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Vendor id, first archive path segment
    pub vendor: String,

    /// API id, second archive path segment
    pub api: String,

    /// Human-readable name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Explicit discovery mode; inferred from the sources when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_mode: Option<DiscoveryMode>,

    /// Source descriptor
    #[serde(default)]
    pub sources: Sources,

    /// Descriptive metadata
    #[serde(default, skip_serializing_if = "EntryMetadata::is_empty")]
    pub metadata: EntryMetadata,

    /// Version bookkeeping
    #[serde(default, skip_serializing_if = "VersionTracking::is_empty")]
    pub version_tracking: VersionTracking,

    /// Agent-assisted discovery context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_context: Option<AgentContext>,

    /// Unmodelled fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackedEntry {
    /// Create a structured-source entry
    pub fn structured(vendor: impl Into<String>, api: impl Into<String>, source: GitHubSource) -> Self {
        let mut entry = Self::bare(vendor.into(), api.into());
        entry.discovery_mode = Some(DiscoveryMode::Structured);
        entry.sources.github = Some(source);
        entry
    }

    /// Create an agent-assisted entry
    pub fn agent_assisted(
        vendor: impl Into<String>,
        api: impl Into<String>,
        documentation_url: impl Into<String>,
    ) -> Self {
        let mut entry = Self::bare(vendor.into(), api.into());
        entry.discovery_mode = Some(DiscoveryMode::AgentAssisted);
        entry.sources.documentation_url = Some(documentation_url.into());
        entry
    }

    /// Create a hybrid entry carrying both sources
    pub fn hybrid(
        vendor: impl Into<String>,
        api: impl Into<String>,
        source: GitHubSource,
        documentation_url: impl Into<String>,
    ) -> Self {
        let mut entry = Self::bare(vendor.into(), api.into());
        entry.discovery_mode = Some(DiscoveryMode::Hybrid);
        entry.sources.github = Some(source);
        entry.sources.documentation_url = Some(documentation_url.into());
        entry
    }

    /// Build a new registry entry from a discovery result.
    ///
    /// The entry is `hybrid` when the result names a repository, otherwise
    /// `agent_assisted`. The result is cached as the entry's previous findings.
    /// No last-known version is recorded, so the first run archives the spec.
    pub fn from_discovery(
        vendor: impl Into<String>,
        api: impl Into<String>,
        documentation_url: impl Into<String>,
        result: DiscoveryResult,
    ) -> Self {
        let vendor = vendor.into();
        let api = api.into();
        let documentation_url = documentation_url.into();
        let mut entry = Self::bare(vendor.clone(), api.clone());

        entry.id = Some(format!("{vendor}-{api}"));
        entry.name = format!("{} {} API", title_case(&vendor), title_case(&api));
        entry.sources.documentation_url = Some(documentation_url.clone());

        if let Some(info) = &result.github_info {
            let mut source = GitHubSource::new(&info.owner, &info.repo, &info.path);
            source.versioning_strategy = result.versioning_strategy.clone();
            entry.sources.github = Some(source);
            entry.discovery_mode = Some(DiscoveryMode::Hybrid);
        } else {
            entry.discovery_mode = Some(DiscoveryMode::AgentAssisted);
        }

        entry.metadata = EntryMetadata {
            documentation_url: Some(documentation_url),
            description: Some(entry.name.clone()),
            tags: vec![vendor, api],
            ..Default::default()
        };
        entry.agent_context = Some(AgentContext {
            previous_findings: Some(result),
            ..Default::default()
        });
        entry
    }

    fn bare(vendor: String, api: String) -> Self {
        Self {
            id: None,
            vendor,
            api,
            name: String::new(),
            discovery_mode: None,
            sources: Sources::default(),
            metadata: EntryMetadata::default(),
            version_tracking: VersionTracking::default(),
            agent_context: None,
            extra: Map::new(),
        }
    }

    /// `<vendor>/<api>`, used as the log prefix and summary key
    pub fn key(&self) -> String {
        format!("{}/{}", self.vendor, self.api)
    }

    /// Effective discovery mode
    pub fn mode(&self) -> DiscoveryMode {
        match self.discovery_mode {
            Some(mode) => mode,
            None if self.sources.github.is_some() => DiscoveryMode::Structured,
            None => DiscoveryMode::AgentAssisted,
        }
    }

    /// Structured source, if configured
    pub fn github(&self) -> Option<&GitHubSource> {
        self.sources.github.as_ref()
    }

    /// Documentation URL used for agent discovery.
    ///
    /// Prefers `sources.documentation_url` and falls back to the metadata copy.
    pub fn documentation_url(&self) -> Option<&str> {
        self.sources
            .documentation_url
            .as_deref()
            .or(self.metadata.documentation_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }

    /// Last-known version, if any
    pub fn last_known_version(&self) -> Option<&str> {
        self.version_tracking.last_known_version.as_deref()
    }

    /// Record a new last-known version
    pub fn set_last_known_version(&mut self, version: impl Into<String>) {
        self.version_tracking.last_known_version = Some(version.into());
    }

    /// Last archived API version of a hybrid entry
    pub fn last_api_version(&self) -> Option<&str> {
        self.version_tracking.last_api_version.as_deref()
    }

    /// Record the API version archived by a hybrid entry
    pub fn set_last_api_version(&mut self, version: impl Into<String>) {
        self.version_tracking.last_api_version = Some(version.into());
    }

    /// Hints for the discovery service
    pub fn hints(&self) -> &[String] {
        self.agent_context
            .as_ref()
            .map(|ctx| ctx.hints.as_slice())
            .unwrap_or(&[])
    }

    /// Previously accepted discovery result
    pub fn cached_findings(&self) -> Option<&DiscoveryResult> {
        self.agent_context.as_ref()?.previous_findings.as_ref()
    }

    /// Cache a discovery result for future runs
    pub fn cache_findings(&mut self, result: DiscoveryResult) {
        self.agent_context
            .get_or_insert_with(AgentContext::default)
            .previous_findings = Some(result);
    }

    /// Check the registry invariants for this entry's discovery mode
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_segment("vendor", &self.vendor)?;
        validate_segment("api", &self.api)?;

        let mode = self.mode();
        if matches!(mode, DiscoveryMode::Structured | DiscoveryMode::Hybrid) {
            let source = self.github().ok_or(DomainError::MissingField("sources.github"))?;
            if source.owner.trim().is_empty() {
                return Err(DomainError::MissingField("sources.github.owner"));
            }
            if source.repo.trim().is_empty() {
                return Err(DomainError::MissingField("sources.github.repo"));
            }
            if source.spec_path.trim().is_empty() {
                return Err(DomainError::MissingField("sources.github.spec_path"));
            }
        }
        if matches!(mode, DiscoveryMode::AgentAssisted | DiscoveryMode::Hybrid)
            && self.documentation_url().is_none()
        {
            return Err(DomainError::MissingField("sources.documentation_url"));
        }
        Ok(())
    }
}

fn validate_segment(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField(field));
    }
    if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
        return Err(DomainError::InvalidValue {
            field,
            reason: format!("'{value}' is not a valid path segment"),
        });
    }
    Ok(())
}

fn title_case(word: &str) -> String {
    word.split(['-', '_', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
