//! Download URL resolution for structured sources
//!
//! Strategies are tried in order; each either locates a URL, declines, or
//! fails. Declines and failures fall through to the next strategy, and the
//! raw-content URL is always available as the final answer.

use specwatch_domain::traits::ReleaseHost;
use specwatch_domain::SpecFormat;
use std::fmt::Display;
use tracing::{debug, warn};

/// What the locator needs to know about one release
#[derive(Debug, Clone, Copy)]
pub struct LocateRequest<'a> {
    /// Repository owner
    pub owner: &'a str,
    /// Repository name
    pub repo: &'a str,
    /// Release tag
    pub tag: &'a str,
    /// Spec path inside the repository
    pub spec_path: &'a str,
    /// Release asset to prefer, if configured
    pub asset_name: Option<&'a str>,
}

/// Outcome of one strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Download from this URL
    Located(String),
    /// Strategy does not apply; the reason is logged
    Declined(String),
    /// Strategy applied but errored; treated like a decline
    Failed(String),
}

/// A located spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSpec {
    /// Download URL
    pub url: String,
    /// Format inferred from the asset name or spec path
    pub format: SpecFormat,
    /// Name of the strategy that located it
    pub strategy: &'static str,
}

/// One way of turning a release into a download URL
pub trait UrlStrategy {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Try to resolve a URL
    fn resolve(&self, request: &LocateRequest<'_>) -> Resolution;
}

/// Prefer a release asset whose name matches the configured asset name exactly
pub struct ReleaseAssetStrategy<'h, H> {
    host: &'h H,
}

impl<'h, H> ReleaseAssetStrategy<'h, H> {
    /// Create a strategy backed by `host`
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }
}

impl<H> UrlStrategy for ReleaseAssetStrategy<'_, H>
where
    H: ReleaseHost,
    H::Error: Display,
{
    fn name(&self) -> &'static str {
        "release-asset"
    }

    fn resolve(&self, request: &LocateRequest<'_>) -> Resolution {
        let Some(asset_name) = request.asset_name else {
            return Resolution::Declined("no release asset configured".to_string());
        };

        match self.host.release_by_tag(request.owner, request.repo, request.tag) {
            Ok(Some(release)) => match release.find_asset(asset_name) {
                Some(asset) => Resolution::Located(asset.download_url.clone()),
                None => Resolution::Declined(format!(
                    "release {} has no asset named '{}'",
                    request.tag, asset_name
                )),
            },
            Ok(None) => Resolution::Declined(format!("no release found for tag {}", request.tag)),
            Err(e) => Resolution::Failed(e.to_string()),
        }
    }
}

/// Raw repository content at the release tag
#[derive(Debug, Clone)]
pub struct RawContentStrategy {
    raw_base: String,
}

impl RawContentStrategy {
    /// Create a strategy building URLs under `raw_base`
    pub fn new(raw_base: impl Into<String>) -> Self {
        Self {
            raw_base: raw_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// `<raw_base>/<owner>/<repo>/<tag>/<spec_path>`
    pub fn url(&self, request: &LocateRequest<'_>) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base,
            request.owner,
            request.repo,
            request.tag,
            request.spec_path.trim_start_matches('/')
        )
    }
}

impl UrlStrategy for RawContentStrategy {
    fn name(&self) -> &'static str {
        "raw-content"
    }

    fn resolve(&self, request: &LocateRequest<'_>) -> Resolution {
        Resolution::Located(self.url(request))
    }
}

/// Ordered strategy list with the raw-content URL as terminal fallback
pub struct SpecLocator<'a> {
    strategies: Vec<Box<dyn UrlStrategy + 'a>>,
    fallback: RawContentStrategy,
}

impl<'a> SpecLocator<'a> {
    /// Locator with only the raw-content fallback
    pub fn new(raw_base: impl Into<String>) -> Self {
        Self {
            strategies: Vec::new(),
            fallback: RawContentStrategy::new(raw_base),
        }
    }

    /// The standard chain: release asset first, then raw content
    pub fn standard<H>(host: &'a H, raw_base: impl Into<String>) -> Self
    where
        H: ReleaseHost + 'a,
        H::Error: Display,
    {
        Self::new(raw_base).with_strategy(ReleaseAssetStrategy::new(host))
    }

    /// Append a strategy, tried before the fallback
    pub fn with_strategy(mut self, strategy: impl UrlStrategy + 'a) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Resolve the download URL. Never fails.
    pub fn locate(&self, request: &LocateRequest<'_>) -> LocatedSpec {
        for strategy in &self.strategies {
            match strategy.resolve(request) {
                Resolution::Located(url) => {
                    debug!("  {} located {}", strategy.name(), url);
                    let format = match (strategy.name(), request.asset_name) {
                        ("release-asset", Some(asset)) => SpecFormat::from_path(asset),
                        _ => SpecFormat::from_path(&url),
                    };
                    return LocatedSpec {
                        url,
                        format,
                        strategy: strategy.name(),
                    };
                }
                Resolution::Declined(reason) => {
                    debug!("  {} declined: {}", strategy.name(), reason);
                }
                Resolution::Failed(error) => {
                    warn!("  {} failed, falling back: {}", strategy.name(), error);
                }
            }
        }

        LocatedSpec {
            url: self.fallback.url(request),
            format: SpecFormat::from_path(request.spec_path),
            strategy: self.fallback.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specwatch_domain::Release;
    use std::cell::Cell;

    struct FakeHost {
        release: Result<Option<Release>, String>,
        calls: Cell<usize>,
    }

    impl FakeHost {
        fn new(release: Result<Option<Release>, String>) -> Self {
            Self {
                release,
                calls: Cell::new(0),
            }
        }
    }

    impl ReleaseHost for FakeHost {
        type Error = String;

        fn latest_release(&self, _owner: &str, _repo: &str) -> Result<Release, Self::Error> {
            Err("unused".to_string())
        }

        fn release_by_tag(&self, _owner: &str, _repo: &str, _tag: &str) -> Result<Option<Release>, Self::Error> {
            self.calls.set(self.calls.get() + 1);
            self.release.clone()
        }
    }

    fn request(asset_name: Option<&str>) -> LocateRequest<'_> {
        LocateRequest {
            owner: "acme",
            repo: "api",
            tag: "v1.2.0",
            spec_path: "spec/openapi.yaml",
            asset_name,
        }
    }

    const ASSET_URL: &str = "https://github.com/acme/api/releases/download/v1.2.0/openapi.yaml";
    const RAW_URL: &str = "https://raw.githubusercontent.com/acme/api/v1.2.0/spec/openapi.yaml";

    #[test]
    fn test_asset_match_takes_precedence() {
        let host = FakeHost::new(Ok(Some(Release::new("v1.2.0").with_asset("openapi.yaml", ASSET_URL))));
        let locator = SpecLocator::standard(&host, "https://raw.githubusercontent.com");

        let located = locator.locate(&request(Some("openapi.yaml")));
        assert_eq!(located.url, ASSET_URL);
        assert_eq!(located.strategy, "release-asset");
    }

    #[test]
    fn test_no_asset_match_uses_raw_url() {
        let host = FakeHost::new(Ok(Some(Release::new("v1.2.0").with_asset("openapi.json", ASSET_URL))));
        let locator = SpecLocator::standard(&host, "https://raw.githubusercontent.com");

        let located = locator.locate(&request(Some("openapi.yaml")));
        assert_eq!(located.url, RAW_URL);
        assert_eq!(located.strategy, "raw-content");
    }

    #[test]
    fn test_missing_release_uses_raw_url() {
        let host = FakeHost::new(Ok(None));
        let locator = SpecLocator::standard(&host, "https://raw.githubusercontent.com/");
        assert_eq!(locator.locate(&request(Some("openapi.yaml"))).url, RAW_URL);
    }

    #[test]
    fn test_lookup_error_falls_through() {
        let host = FakeHost::new(Err("HTTP 401".to_string()));
        let locator = SpecLocator::standard(&host, "https://raw.githubusercontent.com");
        assert_eq!(locator.locate(&request(Some("openapi.yaml"))).url, RAW_URL);
    }

    #[test]
    fn test_no_asset_configured_skips_lookup() {
        let host = FakeHost::new(Ok(Some(Release::new("v1.2.0").with_asset("openapi.yaml", ASSET_URL))));
        let locator = SpecLocator::standard(&host, "https://raw.githubusercontent.com");

        assert_eq!(locator.locate(&request(None)).url, RAW_URL);
        assert_eq!(host.calls.get(), 0);
    }

    #[test]
    fn test_format_follows_asset_name() {
        let host = FakeHost::new(Ok(Some(
            Release::new("v1.2.0").with_asset("spec.json", "https://example.com/download?id=42"),
        )));
        let locator = SpecLocator::standard(&host, "https://raw.githubusercontent.com");

        let located = locator.locate(&request(Some("spec.json")));
        assert_eq!(located.format, SpecFormat::Json);
    }

    #[test]
    fn test_raw_url_trims_leading_slash() {
        let raw = RawContentStrategy::new("https://raw.example.com");
        let mut req = request(None);
        req.spec_path = "/openapi.json";
        assert_eq!(raw.url(&req), "https://raw.example.com/acme/api/v1.2.0/openapi.json");
        assert_eq!(raw.resolve(&req), Resolution::Located(raw.url(&req)));
    }
}
