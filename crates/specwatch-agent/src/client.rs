//! HTTP client for the spec discovery service
//!
//! The service exposes two endpoints:
//!
//! - `POST /discover` with `{vendor, api_name, documentation_url, hints}`,
//!   answering with a discovery result document
//! - `GET /health`, answering `{"status": "healthy"}`
//!
//! # Examples
//!
//! ```no_run
//! use specwatch_agent::AgentDiscoveryClient;
//!
//! let client = AgentDiscoveryClient::new("http://localhost:8000").unwrap();
//! ```

use crate::DiscoveryError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use specwatch_domain::traits::DiscoveryService;
use specwatch_domain::{DiscoveryRequest, DiscoveryResult};
use std::time::Duration;
use tracing::{debug, info};

/// Default discovery service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Discovery service client
///
/// Issues exactly one request per [`discover`](DiscoveryService::discover) call.
pub struct AgentDiscoveryClient {
    endpoint: String,
    client: Client,
}

/// Request body for the discover endpoint
#[derive(Serialize)]
struct DiscoverBody<'a> {
    vendor: &'a str,
    api_name: &'a str,
    documentation_url: &'a str,
    hints: &'a [String],
}

/// Error body returned with non-success statuses
#[derive(Deserialize)]
struct ServiceError {
    error: String,
}

/// Response from the health endpoint
#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

impl AgentDiscoveryClient {
    /// Create a client with the transport's default timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self, DiscoveryError> {
        Self::with_timeout(endpoint, None)
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, DiscoveryError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DiscoveryError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Probe the service health endpoint
    ///
    /// Returns `Ok(true)` when the service reports itself healthy.
    pub fn health(&self) -> Result<bool, DiscoveryError> {
        let url = format!("{}/health", self.endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DiscoveryError::Communication(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Ok(false);
        }
        let health: HealthResponse = response
            .json()
            .map_err(|e| DiscoveryError::Protocol(format!("Failed to parse health response: {}", e)))?;
        Ok(health.status == "healthy")
    }
}

/// Parse and check a discover response body
fn parse_result(body: &str) -> Result<DiscoveryResult, DiscoveryError> {
    let result: DiscoveryResult = serde_json::from_str(body)
        .map_err(|e| DiscoveryError::Protocol(format!("Failed to parse discovery result: {}", e)))?;

    if result.confidence.is_actionable() && result.download_url.trim().is_empty() {
        return Err(DiscoveryError::Protocol(format!(
            "{} confidence result without a download_url",
            result.confidence
        )));
    }
    Ok(result)
}

/// Best-effort message from an error response body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ServiceError>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

impl DiscoveryService for AgentDiscoveryClient {
    type Error = DiscoveryError;

    fn discover(&self, request: &DiscoveryRequest) -> Result<DiscoveryResult, Self::Error> {
        let url = format!("{}/discover", self.endpoint);
        let body = DiscoverBody {
            vendor: &request.vendor,
            api_name: &request.api,
            documentation_url: &request.documentation_url,
            hints: &request.hints,
        };

        debug!("POST {} for {}/{}", url, request.vendor, request.api);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| DiscoveryError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| DiscoveryError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(DiscoveryError::RemoteService {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let result = parse_result(&text)?;
        info!(
            "Discovery for {}/{} answered with {} confidence",
            request.vendor, request.api, result.confidence
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specwatch_domain::Confidence;

    #[test]
    fn test_client_creation() {
        let client = AgentDiscoveryClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000");
    }

    #[test]
    fn test_request_body_shape() {
        let hints = vec!["Look for GitHub links".to_string()];
        let body = DiscoverBody {
            vendor: "zoom",
            api_name: "meetings",
            documentation_url: "https://developers.zoom.us/docs/api/",
            hints: &hints,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["api_name"], "meetings");
        assert_eq!(value["hints"][0], "Look for GitHub links");
    }

    #[test]
    fn test_parse_result() {
        let body = r#"{
            "download_url": "https://zoom.us/openapi.json",
            "version": "2.0.0",
            "format": "json",
            "versioning_strategy": "in-spec",
            "github_info": null,
            "confidence": "medium",
            "reasoning": "Download link in the API reference"
        }"#;
        let result = parse_result(body).unwrap();
        assert_eq!(result.confidence, Confidence::Medium);
        assert_eq!(result.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_parse_result_rejects_bad_shape() {
        assert!(matches!(parse_result("not json"), Err(DiscoveryError::Protocol(_))));
        assert!(matches!(
            parse_result(r#"{"download_url": "https://x", "confidence": "sure"}"#),
            Err(DiscoveryError::Protocol(_))
        ));
        assert!(matches!(
            parse_result(r#"{"confidence": "high"}"#),
            Err(DiscoveryError::Protocol(_))
        ));
    }

    #[test]
    fn test_parse_result_requires_url_when_actionable() {
        assert!(matches!(
            parse_result(r#"{"download_url": "", "confidence": "high"}"#),
            Err(DiscoveryError::Protocol(_))
        ));
        // Low confidence answers are allowed to come back empty-handed
        let low = parse_result(r#"{"download_url": "", "confidence": "low", "reasoning": "nothing found"}"#).unwrap();
        assert_eq!(low.confidence, Confidence::Low);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"error": "Missing required field: vendor"}"#), "Missing required field: vendor");
        assert_eq!(error_message("Internal Server Error\n"), "Internal Server Error");
    }

    #[test]
    fn test_discover_unreachable_service() {
        let client = AgentDiscoveryClient::with_timeout("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let request = DiscoveryRequest {
            vendor: "zoom".to_string(),
            api: "meetings".to_string(),
            documentation_url: "https://developers.zoom.us/docs/api/".to_string(),
            hints: vec![],
        };
        assert!(matches!(client.discover(&request), Err(DiscoveryError::Communication(_))));
    }

    #[test]
    #[ignore] // Only run when the discovery service is available
    fn test_health_integration() {
        let client = AgentDiscoveryClient::new(DEFAULT_ENDPOINT).unwrap();
        assert!(client.health().unwrap());
    }
}
