//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors. All of these abort the run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// None of the token environment variables is set
    #[error("No GitHub token found; set one of: {0}")]
    MissingToken(String),

    /// Registry could not be loaded or written back
    #[error("Registry error: {0}")]
    Registry(#[from] specwatch_store::RegistryError),

    /// HTTP client setup failed
    #[error("GitHub client error: {0}")]
    GitHub(#[from] specwatch_github::GitHubError),

    /// Discovery service call failed
    #[error("Discovery error: {0}")]
    Discovery(#[from] specwatch_agent::DiscoveryError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
