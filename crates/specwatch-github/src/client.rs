//! GitHub releases API client

use crate::error::GitHubError;
use crate::USER_AGENT;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use specwatch_domain::traits::ReleaseHost;
use specwatch_domain::{Release, ReleaseAsset};
use std::time::Duration;
use tracing::debug;

/// Default GitHub REST API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Release lookups against the GitHub REST API
pub struct GitHubClient {
    api_base: String,
    token: String,
    client: Client,
}

/// JSON shape of a release
#[derive(Debug, Deserialize)]
struct GhRelease {
    tag_name: String,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
    #[serde(default)]
    assets: Vec<GhAsset>,
}

#[derive(Debug, Deserialize)]
struct GhAsset {
    name: String,
    browser_download_url: String,
}

impl From<GhRelease> for Release {
    fn from(release: GhRelease) -> Self {
        Release {
            tag: release.tag_name,
            published_at: release.published_at,
            draft: release.draft,
            prerelease: release.prerelease,
            assets: release
                .assets
                .into_iter()
                .map(|a| ReleaseAsset {
                    name: a.name,
                    download_url: a.browser_download_url,
                })
                .collect(),
        }
    }
}

impl GitHubClient {
    /// Create a client for `api.github.com` with the transport's default timeout
    pub fn new(token: impl Into<String>) -> Result<Self, GitHubError> {
        Self::with_settings(DEFAULT_API_BASE, token, None)
    }

    /// Create a client for a specific API base (e.g. GitHub Enterprise)
    pub fn with_settings(
        api_base: impl Into<String>,
        token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GitHubError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GitHubError::Client(e.to_string()))?;

        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        })
    }

    fn latest_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}/releases/latest", self.api_base, owner, repo)
    }

    fn tag_url(&self, owner: &str, repo: &str, tag: &str) -> String {
        format!("{}/repos/{}/{}/releases/tags/{}", self.api_base, owner, repo, tag)
    }

    /// GET a release document, mapping 404 to `Ok(None)`
    fn fetch_release(&self, url: &str) -> Result<Option<Release>, GitHubError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .send()?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let release: GhRelease = response
                    .json()
                    .map_err(|e| GitHubError::Decode(format!("Failed to parse release: {}", e)))?;
                Ok(Some(release.into()))
            }
            _ => Err(status_error(url, response)),
        }
    }
}

fn status_error(url: &str, response: Response) -> GitHubError {
    let status = response.status();
    let body = response
        .text()
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = github_message(&body).unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED => GitHubError::Unauthorized(format!("{url}: {message}")),
        StatusCode::FORBIDDEN => GitHubError::Forbidden(format!("{url}: {message}")),
        _ => GitHubError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull `message` out of a GitHub error document
fn github_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct GhError {
        message: String,
    }
    serde_json::from_str::<GhError>(body).ok().map(|e| e.message)
}

impl ReleaseHost for GitHubClient {
    type Error = GitHubError;

    fn latest_release(&self, owner: &str, repo: &str) -> Result<Release, Self::Error> {
        self.fetch_release(&self.latest_url(owner, repo))?
            .ok_or_else(|| GitHubError::NotFound(format!("no published release for {owner}/{repo}")))
    }

    fn release_by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<Option<Release>, Self::Error> {
        self.fetch_release(&self.tag_url(owner, repo, tag))
    }
}
