//! specwatch Storage Layer
//!
//! Filesystem persistence for the monitor:
//!
//! - [`SpecStore`]: the versioned spec archive, `<root>/<vendor>/<api>/<version>/openapi.<ext>`
//!   plus a `.metadata.json` sidecar
//! - [`RegistryManager`]: loads and rewrites the tracked-entry registry and
//!   writes the plain-text change summary
//!
//! Both write deterministic paths, so re-running with unchanged inputs
//! overwrites files with equivalent content. Concurrent runs against the same
//! archive are not supported.

#![warn(missing_docs)]

pub mod archive;
pub mod error;
pub mod registry;

pub use archive::{SpecStore, METADATA_FILE};
pub use error::{RegistryError, StoreError};
pub use registry::RegistryManager;
