//! Versioned spec archive

use crate::error::StoreError;
use serde::Serialize;
use specwatch_domain::traits::{PersistedSpec, SpecArchive, SpecArtifact};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the hidden metadata sidecar inside each version directory
pub const METADATA_FILE: &str = ".metadata.json";

/// Sidecar document written next to every archived spec
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpecMetadata<'a> {
    name: &'a str,
    base_url: Option<&'a str>,
    documentation_url: Option<&'a str>,
    description: Option<&'a str>,
    tags: &'a [String],
}

/// Filesystem archive keyed by vendor, API and API version
///
/// # Examples
///
/// ```no_run
/// use specwatch_store::SpecStore;
///
/// let store = SpecStore::new("openapi");
/// let dir = store.version_dir("stripe", "payments", "2024-06-20").unwrap();
/// assert!(dir.ends_with("stripe/payments/2024-06-20"));
/// ```
#[derive(Debug, Clone)]
pub struct SpecStore {
    root: PathBuf,
}

impl SpecStore {
    /// Create an archive rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Archive root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical directory for a key: `<root>/<vendor>/<api>/<version>`
    pub fn version_dir(&self, vendor: &str, api: &str, version: &str) -> Result<PathBuf, StoreError> {
        Ok(self
            .root
            .join(segment(vendor)?)
            .join(segment(api)?)
            .join(segment(version)?))
    }

    fn write_metadata(&self, dir: &Path, artifact: &SpecArtifact<'_>) -> Result<PathBuf, StoreError> {
        let metadata = SpecMetadata {
            name: artifact.name,
            base_url: artifact.metadata.base_url.as_deref(),
            documentation_url: artifact.metadata.documentation_url.as_deref(),
            description: artifact.metadata.description.as_deref(),
            tags: &artifact.metadata.tags,
        };
        let mut json = serde_json::to_string_pretty(&metadata)?;
        json.push('\n');

        let path = dir.join(METADATA_FILE);
        fs::write(&path, json).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Turn a key component into a single, safe directory name
fn segment(value: &str) -> Result<String, StoreError> {
    let cleaned = value.trim().replace(['/', '\\'], "-");
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return Err(StoreError::InvalidKey(format!("'{}' cannot be used as a path segment", value)));
    }
    Ok(cleaned)
}

impl SpecArchive for SpecStore {
    type Error = StoreError;

    fn spec_path(&self, artifact: &SpecArtifact<'_>) -> Result<PathBuf, Self::Error> {
        let dir = self.version_dir(artifact.vendor, artifact.api, artifact.version)?;
        Ok(dir.join(format!("openapi.{}", artifact.format.extension())))
    }

    fn persist(&self, artifact: &SpecArtifact<'_>) -> Result<PersistedSpec, Self::Error> {
        let spec_path = self.spec_path(artifact)?;
        let dir = spec_path.parent().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        fs::write(&spec_path, artifact.content).map_err(|source| StoreError::Io {
            path: spec_path.clone(),
            source,
        })?;
        debug!("Wrote {} ({} bytes)", spec_path.display(), artifact.content.len());

        // The spec write stands even if the sidecar fails
        let metadata_error = match self.write_metadata(&dir, artifact) {
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to write metadata for {}: {}", spec_path.display(), e);
                Some(e.to_string())
            }
        };

        Ok(PersistedSpec {
            spec_path,
            metadata_error,
        })
    }
}
