//! specwatch Update Pipeline
//!
//! Orchestrates one monitoring run over the tracked-entry registry. Each entry
//! is handled according to its discovery mode:
//!
//! - **structured**: latest release of the configured repository, download
//!   from a matching release asset or the raw file at the tag
//! - **agent_assisted**: ask the discovery service where the spec lives,
//!   gated on its confidence
//! - **hybrid**: structured first, the discovery service once on any failure
//!
//! New specs are archived under their API version and the entry's last-known
//! version is advanced. Failures are isolated per entry.
//!
//! # Architecture
//!
//! The pipeline only sees the domain traits (`ReleaseHost`, `ContentFetcher`,
//! `DiscoveryService`, `SpecArchive`), so every collaborator can be replaced
//! by a mock in tests.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod locator;
pub mod pipeline;
pub mod report;
pub mod version;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use locator::{LocateRequest, LocatedSpec, Resolution, SpecLocator, UrlStrategy};
pub use pipeline::{EntryOutcome, UpdatePipeline};
pub use report::{EntryFailure, RunReport};
pub use version::{extract_api_version, fallback_version, looks_like_openapi};
