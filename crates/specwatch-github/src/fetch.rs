//! Plain HTTP downloads of spec content

use crate::error::GitHubError;
use crate::USER_AGENT;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::Url;
use specwatch_domain::traits::{ContentFetcher, FetchedContent};
use std::time::Duration;
use tracing::debug;

/// Hosts that receive the GitHub token; any other host is fetched anonymously
const GITHUB_HOSTS: &[&str] = &[
    "github.com",
    "api.github.com",
    "raw.githubusercontent.com",
    "objects.githubusercontent.com",
];

/// Generic GET over HTTP(S), returning status and text body
pub struct HttpFetcher {
    client: Client,
    token: Option<String>,
}

impl HttpFetcher {
    /// Create a fetcher with the transport's default timeout
    pub fn new() -> Result<Self, GitHubError> {
        Self::with_timeout(None)
    }

    /// Create a fetcher with an explicit request timeout
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, GitHubError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GitHubError::Client(e.to_string()))?;
        Ok(Self { client, token: None })
    }

    /// Attach a token sent to GitHub-owned hosts only
    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

fn is_github_host(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
        .map(|host| GITHUB_HOSTS.contains(&host.as_str()))
        .unwrap_or(false)
}

impl ContentFetcher for HttpFetcher {
    type Error = GitHubError;

    fn get(&self, url: &str) -> Result<FetchedContent, Self::Error> {
        debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            if is_github_host(url) {
                request = request.header(AUTHORIZATION, format!("Bearer {}", token));
            }
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| GitHubError::Transport(format!("Failed to read body of {}: {}", url, e)))?;

        Ok(FetchedContent { status, body })
    }
}
