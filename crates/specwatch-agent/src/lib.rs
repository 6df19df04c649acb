//! specwatch Agent Discovery Layer
//!
//! Clients for the external spec discovery service, which reads a vendor's
//! documentation page and answers with a download URL, a detected version and
//! a confidence rating.
//!
//! # Providers
//!
//! - `MockDiscovery`: Deterministic mock for testing
//! - `AgentDiscoveryClient`: HTTP client for the discovery service
//!
//! # Examples
//!
//! ```
//! use specwatch_agent::MockDiscovery;
//! use specwatch_domain::traits::DiscoveryService;
//! use specwatch_domain::{Confidence, DiscoveryRequest, DiscoveryResult};
//!
//! let mock = MockDiscovery::new(DiscoveryResult::new("https://example.com/openapi.yaml", Confidence::High));
//! let request = DiscoveryRequest {
//!     vendor: "zoom".to_string(),
//!     api: "meetings".to_string(),
//!     documentation_url: "https://developers.zoom.us/docs/api/".to_string(),
//!     hints: vec![],
//! };
//! let result = mock.discover(&request).unwrap();
//! assert_eq!(result.confidence, Confidence::High);
//! ```

#![warn(missing_docs)]

pub mod client;

use specwatch_domain::traits::DiscoveryService;
use specwatch_domain::{DiscoveryRequest, DiscoveryResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub use client::AgentDiscoveryClient;

/// Errors that can occur during discovery
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// The service answered with a non-success status
    #[error("Discovery service returned HTTP {status}: {message}")]
    RemoteService {
        /// Status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// The response body does not match the discovery result shape
    #[error("Protocol error: {0}")]
    Protocol(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Result(DiscoveryResult),
    Error(u16, String),
}

/// Mock discovery service for deterministic testing
///
/// Returns pre-configured results without making any network calls. Clones
/// share their configured replies and call counter.
///
/// # Examples
///
/// ```
/// use specwatch_agent::MockDiscovery;
/// use specwatch_domain::traits::DiscoveryService;
/// use specwatch_domain::{Confidence, DiscoveryRequest, DiscoveryResult};
///
/// let mock = MockDiscovery::new(DiscoveryResult::new("https://default/spec.yaml", Confidence::Medium));
/// mock.add_result("zoom", DiscoveryResult::new("https://zoom/spec.json", Confidence::High));
/// mock.add_error("jira", 500, "model overloaded");
///
/// let request = |vendor: &str| DiscoveryRequest {
///     vendor: vendor.to_string(),
///     api: "api".to_string(),
///     documentation_url: "https://docs".to_string(),
///     hints: vec![],
/// };
/// assert_eq!(mock.discover(&request("zoom")).unwrap().download_url, "https://zoom/spec.json");
/// assert!(mock.discover(&request("jira")).is_err());
/// assert_eq!(mock.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockDiscovery {
    default_reply: MockReply,
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    calls: Arc<Mutex<Vec<DiscoveryRequest>>>,
}

impl MockDiscovery {
    /// Create a mock returning `result` for every vendor
    pub fn new(result: DiscoveryResult) -> Self {
        Self::with_default(MockReply::Result(result))
    }

    /// Create a mock failing every call with the given status
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self::with_default(MockReply::Error(status, message.into()))
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            replies: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return `result` for requests about `vendor`
    pub fn add_result(&self, vendor: impl Into<String>, result: DiscoveryResult) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(vendor.into(), MockReply::Result(result));
    }

    /// Fail requests about `vendor` with a remote service error
    pub fn add_error(&self, vendor: impl Into<String>, status: u16, message: impl Into<String>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(vendor.into(), MockReply::Error(status, message.into()));
    }

    /// Number of discover calls made
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Requests received, in order
    pub fn calls(&self) -> Vec<DiscoveryRequest> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl DiscoveryService for MockDiscovery {
    type Error = DiscoveryError;

    fn discover(&self, request: &DiscoveryRequest) -> Result<DiscoveryResult, Self::Error> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&request.vendor)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Result(result) => Ok(result),
            MockReply::Error(status, message) => Err(DiscoveryError::RemoteService { status, message }),
        }
    }
}
