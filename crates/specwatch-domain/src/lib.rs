//! specwatch Domain Layer
//!
//! Core data model and collaborator traits for the upstream OpenAPI spec
//! monitor. Everything that talks to the network or the filesystem lives in
//! other crates and plugs in through the traits defined here.
//!
//! ## Key Concepts
//!
//! - **Tracked entry**: one vendor/API pair whose upstream spec releases are monitored
//! - **Discovery mode**: structured source, agent-assisted, or hybrid
//! - **Discovery result**: where to download a spec and how much to trust that location
//! - **Update result**: the record of one successful version change in a run
//!
//! ## Architecture
//!
//! - Plain data types with serde derives for the registry document
//! - Trait definitions for the release host, HTTP fetcher, discovery
//!   service and spec archive

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod discovery;
pub mod entry;
pub mod error;
pub mod format;
pub mod release;
pub mod traits;
pub mod update;

// Re-exports for convenience
pub use discovery::{Confidence, DiscoveryRequest, DiscoveryResult, GitHubInfo, VersioningStrategy};
pub use entry::{
    AgentContext, DiscoveryMode, EntryMetadata, GitHubSource, Sources, TrackedEntry,
    VersionTracking,
};
pub use error::DomainError;
pub use format::SpecFormat;
pub use release::{Release, ReleaseAsset};
pub use update::UpdateResult;
