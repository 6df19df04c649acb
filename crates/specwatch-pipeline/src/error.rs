//! Error types for the update pipeline

use thiserror::Error;

/// Per-entry failures. None of these abort a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The entry has no structured source
    #[error("No structured source configured")]
    MissingSource,

    /// Release lookup failed (not found, auth, transport)
    #[error("Release lookup failed: {0}")]
    Release(String),

    /// Transport failure while downloading
    #[error("Download of {url} failed: {message}")]
    Transport {
        /// URL being fetched
        url: String,
        /// Transport error
        message: String,
    },

    /// Download answered with a status other than 200
    #[error("Download of {url} returned HTTP {status}")]
    Download {
        /// URL being fetched
        url: String,
        /// Status code
        status: u16,
    },

    /// Discovery service error or malformed response
    #[error("Discovery failed: {0}")]
    Discovery(String),

    /// Downloaded content is not an OpenAPI document
    #[error("Content at {0} does not look like an OpenAPI document")]
    NotOpenApi(String),

    /// No API version in the content and no fallback available
    #[error("Could not determine the API version of {0}")]
    VersionUndetermined(String),

    /// Primary spec write failed
    #[error("Persistence failed: {0}")]
    Persist(String),

    /// Structured path failed and no documentation URL exists for the agent fallback
    #[error("Structured source failed ({0}) and no documentation URL is available for fallback")]
    NoFallback(Box<PipelineError>),
}
