//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the update pipeline and its
//! collaborators. Implementations live in other crates.

use crate::discovery::{DiscoveryRequest, DiscoveryResult};
use crate::entry::EntryMetadata;
use crate::format::SpecFormat;
use crate::release::Release;
use std::path::PathBuf;

/// Trait for the upstream release-hosting service
///
/// Implemented by the infrastructure layer (specwatch-github)
pub trait ReleaseHost {
    /// Error type for release lookups
    type Error;

    /// Get the latest published release of a repository
    fn latest_release(&self, owner: &str, repo: &str) -> Result<Release, Self::Error>;

    /// Get the release for a tag, `Ok(None)` when no such release exists
    fn release_by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<Option<Release>, Self::Error>;
}

/// Response of a plain HTTP GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedContent {
    /// HTTP status code
    pub status: u16,
    /// Body decoded as text
    pub body: String,
}

impl FetchedContent {
    /// Whether the status is 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Trait for fetching arbitrary URLs
///
/// Implemented by the infrastructure layer (specwatch-github)
pub trait ContentFetcher {
    /// Error type for transport failures
    type Error;

    /// GET a URL
    fn get(&self, url: &str) -> Result<FetchedContent, Self::Error>;
}

/// Trait for the external spec discovery service
///
/// Implemented by the infrastructure layer (specwatch-agent)
pub trait DiscoveryService {
    /// Error type for discovery calls
    type Error;

    /// Resolve download location, version and confidence for a documentation URL
    fn discover(&self, request: &DiscoveryRequest) -> Result<DiscoveryResult, Self::Error>;
}

/// A spec ready to be written into the versioned archive
#[derive(Debug, Clone)]
pub struct SpecArtifact<'a> {
    /// Vendor id
    pub vendor: &'a str,
    /// API id
    pub api: &'a str,
    /// API version, third archive path segment
    pub version: &'a str,
    /// Spec body
    pub content: &'a str,
    /// Archive file format
    pub format: SpecFormat,
    /// Human-readable name for the sidecar
    pub name: &'a str,
    /// Metadata for the sidecar
    pub metadata: &'a EntryMetadata,
}

/// Where an artifact ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSpec {
    /// Path of the spec file
    pub spec_path: PathBuf,
    /// Sidecar write failure, if any; the spec write stands regardless
    pub metadata_error: Option<String>,
}

/// Trait for the versioned spec archive
///
/// Implemented by the infrastructure layer (specwatch-store)
pub trait SpecArchive {
    /// Error type for archive writes
    type Error;

    /// Path `persist` writes the spec to, without touching the archive
    fn spec_path(&self, artifact: &SpecArtifact<'_>) -> Result<PathBuf, Self::Error>;

    /// Write the spec and its metadata sidecar
    fn persist(&self, artifact: &SpecArtifact<'_>) -> Result<PersistedSpec, Self::Error>;
}
