//! Error types for GitHub and HTTP operations

use thiserror::Error;

/// Errors that can occur talking to the release host or fetching content
#[derive(Error, Debug)]
pub enum GitHubError {
    /// HTTP client could not be constructed
    #[error("Client error: {0}")]
    Client(String),

    /// Network or transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Repository or release does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Token missing, expired or revoked (HTTP 401)
    #[error("Unauthorized (HTTP 401): {0}")]
    Unauthorized(String),

    /// Token lacks access or rate limit hit (HTTP 403)
    #[error("Forbidden (HTTP 403): {0}")]
    Forbidden(String),

    /// Any other non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        /// Status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GitHubError::Decode(e.to_string())
        } else {
            GitHubError::Transport(e.to_string())
        }
    }
}
