//! specwatch GitHub Layer
//!
//! Blocking HTTP implementations of the release-host and content-fetch
//! collaborators.
//!
//! - `GitHubClient`: [`ReleaseHost`](specwatch_domain::traits::ReleaseHost) over the GitHub REST releases API
//! - `HttpFetcher`: [`ContentFetcher`](specwatch_domain::traits::ContentFetcher) for spec downloads
//!
//! # Examples
//!
//! ```no_run
//! use specwatch_github::GitHubClient;
//! use specwatch_domain::traits::ReleaseHost;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new("ghp_token")?;
//! let release = client.latest_release("stripe", "openapi")?;
//! println!("latest: {}", release.tag);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod fetch;

pub use client::{GitHubClient, DEFAULT_API_BASE};
pub use error::GitHubError;
pub use fetch::HttpFetcher;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("specwatch/", env!("CARGO_PKG_VERSION"));
