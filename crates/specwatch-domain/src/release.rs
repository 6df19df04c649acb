//! Upstream release model

/// A downloadable file attached to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    /// Asset file name
    pub name: String,
    /// Direct download URL
    pub download_url: String,
}

/// A published release of an upstream repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Release tag name (e.g. `v2.1.0`)
    pub tag: String,
    /// Publication timestamp as reported by the host
    pub published_at: Option<String>,
    /// Draft releases are never acted on
    pub draft: bool,
    /// Pre-releases are never acted on
    pub prerelease: bool,
    /// Attached assets
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Create a published (non-draft, non-prerelease) release without assets
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            published_at: None,
            draft: false,
            prerelease: false,
            assets: Vec::new(),
        }
    }

    /// Add an asset
    pub fn with_asset(mut self, name: impl Into<String>, download_url: impl Into<String>) -> Self {
        self.assets.push(ReleaseAsset {
            name: name.into(),
            download_url: download_url.into(),
        });
        self
    }

    /// Whether the release is a draft or a pre-release
    pub fn is_unpublished(&self) -> bool {
        self.draft || self.prerelease
    }

    /// Find an asset whose name equals `name` exactly
    pub fn find_asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_asset_exact_match() {
        let release = Release::new("v1.0.0")
            .with_asset("openapi.yaml.sig", "https://example.com/sig")
            .with_asset("openapi.yaml", "https://example.com/spec");

        let asset = release.find_asset("openapi.yaml").unwrap();
        assert_eq!(asset.download_url, "https://example.com/spec");
        assert!(release.find_asset("OpenAPI.yaml").is_none());
    }

    #[test]
    fn test_unpublished() {
        let mut release = Release::new("v1.0.0");
        assert!(!release.is_unpublished());
        release.prerelease = true;
        assert!(release.is_unpublished());
        release.prerelease = false;
        release.draft = true;
        assert!(release.is_unpublished());
    }
}
