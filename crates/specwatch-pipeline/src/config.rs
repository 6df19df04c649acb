//! Configuration for the update pipeline

use serde::{Deserialize, Serialize};

/// Default base for raw repository content URLs
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Configuration for an update run
///
/// # Examples
///
/// ```
/// use specwatch_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.raw_base, "https://raw.githubusercontent.com");
/// assert!(!config.dry_run);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Base for `<raw_base>/<owner>/<repo>/<tag>/<spec_path>` URLs
    #[serde(default = "default_raw_base")]
    pub raw_base: String,

    /// Dry-run mode: download and extract, but never write the archive or touch entries
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

fn default_raw_base() -> String {
    DEFAULT_RAW_BASE.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_base: default_raw_base(),
            dry_run: false,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.raw_base.trim().is_empty() {
            return Err("raw_base must not be empty".to_string());
        }
        Ok(())
    }
}
