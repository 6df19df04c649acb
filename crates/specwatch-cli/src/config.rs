//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use specwatch_agent::client::DEFAULT_ENDPOINT;
use specwatch_github::DEFAULT_API_BASE;
use specwatch_pipeline::config::DEFAULT_RAW_BASE;
use specwatch_pipeline::PipelineConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "specwatch.toml";

/// Token variables tried in order when none are configured
pub const DEFAULT_TOKEN_ENV: &[&str] = &["SPECWATCH_GITHUB_TOKEN", "GITHUB_TOKEN", "GH_TOKEN"];

/// Run configuration.
///
/// # Examples
///
/// ```
/// use specwatch_cli::Config;
///
/// let config: Config = toml::from_str("archive_root = \"specs\"").unwrap();
/// assert_eq!(config.archive_root.to_str(), Some("specs"));
/// assert_eq!(config.github.api_base, "https://api.github.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tracked-entry registry document
    #[serde(default = "default_registry_path")]
    pub registry_path: PathBuf,

    /// Root of the versioned spec archive
    #[serde(default = "default_archive_root")]
    pub archive_root: PathBuf,

    /// Change summary written after a run with updates
    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,

    /// Download and extract without writing anything
    #[serde(default)]
    pub dry_run: bool,

    /// Release host settings
    #[serde(default)]
    pub github: GitHubSettings,

    /// Discovery service settings
    #[serde(default)]
    pub agent: AgentSettings,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpSettings,
}

/// Release host settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubSettings {
    /// REST API base
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Raw content base
    #[serde(default = "default_raw_base")]
    pub raw_base: String,

    /// Environment variables holding the token, in priority order
    #[serde(default = "default_token_env")]
    pub token_env: Vec<String>,
}

/// Discovery service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Service base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

/// HTTP transport settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout; the transport default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("connector_registry.json")
}

fn default_archive_root() -> PathBuf {
    PathBuf::from("openapi")
}

fn default_summary_path() -> PathBuf {
    PathBuf::from("update_summary.txt")
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_raw_base() -> String {
    DEFAULT_RAW_BASE.to_string()
}

fn default_token_env() -> Vec<String> {
    DEFAULT_TOKEN_ENV.iter().map(|name| name.to_string()).collect()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_path: default_registry_path(),
            archive_root: default_archive_root(),
            summary_path: default_summary_path(),
            dry_run: false,
            github: GitHubSettings::default(),
            agent: AgentSettings::default(),
            http: HttpSettings::default(),
        }
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            raw_base: default_raw_base(),
            token_env: default_token_env(),
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `specwatch.toml` in the
    /// working directory is used if present, else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Parse a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.as_ref().display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Reject empty paths and endpoints
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("registry_path", &self.registry_path),
            ("archive_root", &self.archive_root),
            ("summary_path", &self.summary_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(CliError::Config(format!("{} must not be empty", name)));
            }
        }
        if self.github.api_base.trim().is_empty() {
            return Err(CliError::Config("github.api_base must not be empty".into()));
        }
        if self.agent.endpoint.trim().is_empty() {
            return Err(CliError::Config("agent.endpoint must not be empty".into()));
        }
        if self.github.token_env.is_empty() {
            return Err(CliError::Config("github.token_env must name at least one variable".into()));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(CliError::Config("http.timeout_secs must be greater than zero".into()));
        }
        self.pipeline_config().validate().map_err(CliError::Config)
    }

    /// First non-empty token from the configured environment variables
    pub fn resolve_token<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.github
            .token_env
            .iter()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .ok_or_else(|| CliError::MissingToken(self.github.token_env.join(", ")))
    }

    /// Request timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.http.timeout_secs.map(Duration::from_secs)
    }

    /// Settings handed to the update pipeline
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            raw_base: self.github.raw_base.clone(),
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.registry_path, PathBuf::from("connector_registry.json"));
        assert_eq!(config.github.token_env, vec!["SPECWATCH_GITHUB_TOKEN", "GITHUB_TOKEN", "GH_TOKEN"]);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("specwatch.toml");
        fs::write(
            &path,
            r#"
registry_path = "registry/entries.json"
dry_run = true

[github]
raw_base = "https://raw.example.com"
token_env = ["MY_TOKEN"]

[agent]
endpoint = "http://agent:9000"

[http]
timeout_secs = 30
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.registry_path, PathBuf::from("registry/entries.json"));
        assert_eq!(config.archive_root, PathBuf::from("openapi"));
        assert!(config.dry_run);
        assert_eq!(config.github.api_base, "https://api.github.com");
        assert_eq!(config.github.token_env, vec!["MY_TOKEN"]);
        assert_eq!(config.agent.endpoint, "http://agent:9000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));

        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.raw_base, "https://raw.example.com");
        assert!(pipeline.dry_run);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(dir.path().join("missing.toml").as_path()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "dry_run = \"sometimes\"").unwrap();
        assert!(matches!(Config::from_file(&path), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let mut config = Config::default();
        config.agent.endpoint = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.archive_root = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_token_priority() {
        let config = Config::default();
        let env: HashMap<&str, &str> = [("GITHUB_TOKEN", "second"), ("GH_TOKEN", "third")].into_iter().collect();
        let token = config.resolve_token(|name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(token, "second");
    }

    #[test]
    fn test_resolve_token_skips_empty_values() {
        let config = Config::default();
        let env: HashMap<&str, &str> = [("SPECWATCH_GITHUB_TOKEN", ""), ("GH_TOKEN", "third")].into_iter().collect();
        let token = config.resolve_token(|name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(token, "third");
    }

    #[test]
    fn test_missing_token() {
        let config = Config::default();
        match config.resolve_token(|_| None) {
            Err(CliError::MissingToken(vars)) => {
                assert_eq!(vars, "SPECWATCH_GITHUB_TOKEN, GITHUB_TOKEN, GH_TOKEN");
            }
            other => panic!("Expected MissingToken, got {:?}", other),
        }
    }
}
