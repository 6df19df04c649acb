//! Spec content format

use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialization format of a spec artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecFormat {
    /// YAML document (`.yaml` / `.yml`)
    #[default]
    Yaml,
    /// JSON document
    Json,
}

impl SpecFormat {
    /// Infer the format from a file name or path.
    ///
    /// Only a `.json` extension selects JSON; everything else is treated as YAML.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".json") {
            SpecFormat::Json
        } else {
            SpecFormat::Yaml
        }
    }

    /// Parse a loose format label such as `"yaml"`, `"YML"` or `"json"`.
    ///
    /// Unrecognised labels fall back to YAML.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "json" => SpecFormat::Json,
            _ => SpecFormat::Yaml,
        }
    }

    /// File extension used in the archive
    pub fn extension(&self) -> &'static str {
        match self {
            SpecFormat::Yaml => "yaml",
            SpecFormat::Json => "json",
        }
    }
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
