//! Update pipeline: one pass over the registry

use crate::locator::{LocateRequest, SpecLocator};
use crate::version::{extract_api_version, fallback_version, looks_like_openapi};
use crate::{PipelineConfig, PipelineError, RunReport};
use specwatch_domain::traits::{ContentFetcher, DiscoveryService, ReleaseHost, SpecArchive, SpecArtifact};
use specwatch_domain::{Confidence, DiscoveryMode, DiscoveryRequest, DiscoveryResult, SpecFormat, TrackedEntry, UpdateResult};
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Result of processing one entry without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// A new spec was archived
    Updated(UpdateResult),
    /// Upstream has not moved since the last run
    Unchanged,
    /// Nothing to do; the reason is logged
    Skipped(String),
}

/// Checks every tracked entry for a new upstream spec and archives it
///
/// Entries are processed sequentially in registry order. A failing entry is
/// logged and counted; it never stops the run or touches other entries.
/// Entries are only mutated when their update succeeds.
///
/// # Examples
///
/// ```no_run
/// use specwatch_agent::AgentDiscoveryClient;
/// use specwatch_github::{GitHubClient, HttpFetcher};
/// use specwatch_pipeline::{PipelineConfig, UpdatePipeline};
/// use specwatch_store::{RegistryManager, SpecStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = RegistryManager::new("connector_registry.json", "update_summary.txt");
/// let mut entries = registry.load()?;
///
/// let pipeline = UpdatePipeline::new(
///     GitHubClient::new("token")?,
///     HttpFetcher::new()?,
///     AgentDiscoveryClient::new("http://localhost:8000")?,
///     SpecStore::new("openapi"),
///     PipelineConfig::default(),
/// );
/// let report = pipeline.run(&mut entries);
///
/// registry.save(&entries)?;
/// registry.write_summary(&report.updates)?;
/// # Ok(())
/// # }
/// ```
pub struct UpdatePipeline<H, F, D, A> {
    host: H,
    fetcher: F,
    discovery: D,
    archive: A,
    config: PipelineConfig,
}

impl<H, F, D, A> UpdatePipeline<H, F, D, A>
where
    H: ReleaseHost,
    H::Error: Display,
    F: ContentFetcher,
    F::Error: Display,
    D: DiscoveryService,
    D::Error: Display,
    A: SpecArchive,
    A::Error: Display,
{
    /// Assemble a pipeline from its collaborators
    pub fn new(host: H, fetcher: F, discovery: D, archive: A, config: PipelineConfig) -> Self {
        Self {
            host,
            fetcher,
            discovery,
            archive,
            config,
        }
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every entry and collect the outcomes
    pub fn run(&self, entries: &mut [TrackedEntry]) -> RunReport {
        let mut report = RunReport::new();

        for entry in entries.iter_mut() {
            let key = entry.key();
            match self.process(entry) {
                Ok(EntryOutcome::Updated(update)) => {
                    info!(
                        "[{}] updated {} → {} (API v{})",
                        key, update.old_version, update.new_version, update.api_version
                    );
                    report.record_update(update);
                }
                Ok(EntryOutcome::Unchanged) => report.record_unchanged(),
                Ok(EntryOutcome::Skipped(reason)) => {
                    info!("[{}] skipped: {}", key, reason);
                    report.record_skip();
                }
                Err(e) => {
                    error!("[{}] {}", key, e);
                    report.record_failure(key, e.to_string());
                }
            }
        }

        report
    }

    /// Process one entry according to its discovery mode
    pub fn process(&self, entry: &mut TrackedEntry) -> Result<EntryOutcome, PipelineError> {
        match entry.mode() {
            DiscoveryMode::Structured => self.process_structured(entry),
            DiscoveryMode::AgentAssisted => self.process_agent(entry),
            DiscoveryMode::Hybrid => self.process_hybrid(entry),
        }
    }

    fn process_structured(&self, entry: &mut TrackedEntry) -> Result<EntryOutcome, PipelineError> {
        let key = entry.key();
        let source = entry.github().cloned().ok_or(PipelineError::MissingSource)?;

        let release = self
            .host
            .latest_release(&source.owner, &source.repo)
            .map_err(|e| PipelineError::Release(e.to_string()))?;

        if release.is_unpublished() {
            return Ok(EntryOutcome::Skipped(format!(
                "release {} is a draft or pre-release",
                release.tag
            )));
        }

        let old_version = entry.last_known_version().map(str::to_string);
        if old_version.as_deref() == Some(release.tag.as_str()) {
            debug!("[{}] up to date at {}", key, release.tag);
            return Ok(EntryOutcome::Unchanged);
        }
        info!(
            "[{}] new release {} (was {})",
            key,
            release.tag,
            old_version.as_deref().unwrap_or("none")
        );

        let locator = SpecLocator::standard(&self.host, self.config.raw_base.as_str());
        let located = locator.locate(&LocateRequest {
            owner: &source.owner,
            repo: &source.repo,
            tag: &release.tag,
            spec_path: &source.spec_path,
            asset_name: source.release_asset_name.as_deref(),
        });
        info!("  downloading {} via {}", located.url, located.strategy);

        let content = self.download(&located.url)?;
        if !looks_like_openapi(&content) {
            warn!("  content at {} does not look like an OpenAPI document", located.url);
        }

        let api_version = match extract_api_version(&content) {
            Some(version) => version,
            None => {
                let version = fallback_version(&release.tag);
                info!("  no info.version found, using {} from the tag", version);
                version
            }
        };

        let spec_path = self.persist(entry, &api_version, &content, located.format)?;
        let update = UpdateResult {
            vendor: entry.vendor.clone(),
            api: entry.api.clone(),
            old_version: old_version.unwrap_or_else(|| "none".to_string()),
            new_version: release.tag.clone(),
            api_version,
            spec_path,
        };

        if !self.config.dry_run {
            entry.set_last_known_version(release.tag);
            if entry.mode() == DiscoveryMode::Hybrid {
                entry.set_last_api_version(update.api_version.clone());
            }
        }
        Ok(EntryOutcome::Updated(update))
    }

    fn process_agent(&self, entry: &mut TrackedEntry) -> Result<EntryOutcome, PipelineError> {
        self.discover_and_update(entry, false)
    }

    /// Agent-assisted update.
    ///
    /// As a hybrid fallback the result is compared against and recorded as
    /// the last API version, leaving the release tag in place.
    fn discover_and_update(
        &self,
        entry: &mut TrackedEntry,
        fallback: bool,
    ) -> Result<EntryOutcome, PipelineError> {
        let key = entry.key();
        let Some(documentation_url) = entry.documentation_url().map(str::to_string) else {
            warn!("[{}] no documentation URL configured", key);
            return Ok(EntryOutcome::Skipped("no documentation URL".to_string()));
        };

        let (result, fresh) = match cached_high_confidence(entry) {
            Some(cached) => {
                info!("[{}] using cached findings for {}", key, documentation_url);
                (cached.clone(), false)
            }
            None => {
                info!("[{}] discovering spec from {}", key, documentation_url);
                let request = DiscoveryRequest {
                    vendor: entry.vendor.clone(),
                    api: entry.api.clone(),
                    documentation_url: documentation_url.clone(),
                    hints: entry.hints().to_vec(),
                };
                let result = self
                    .discovery
                    .discover(&request)
                    .map_err(|e| PipelineError::Discovery(e.to_string()))?;
                (result, true)
            }
        };

        if !result.confidence.is_actionable() {
            warn!("  {} confidence result: {}", result.confidence, result.reasoning);
            return Ok(EntryOutcome::Skipped(format!(
                "{} confidence discovery, manual review needed",
                result.confidence
            )));
        }
        if result.download_url.trim().is_empty() {
            return Err(PipelineError::Discovery("result has no download URL".to_string()));
        }
        debug!("  {} confidence: {}", result.confidence, result.reasoning);

        let content = self.download(&result.download_url)?;
        if !looks_like_openapi(&content) {
            return Err(PipelineError::NotOpenApi(result.download_url.clone()));
        }

        let api_version = extract_api_version(&content)
            .or_else(|| {
                result
                    .version
                    .as_deref()
                    .map(fallback_version)
                    .filter(|version| !version.is_empty())
            })
            .ok_or_else(|| PipelineError::VersionUndetermined(result.download_url.clone()))?;

        let old_version = if fallback {
            entry.last_api_version().map(str::to_string)
        } else {
            entry.last_known_version().map(str::to_string)
        };
        if old_version.as_deref() == Some(api_version.as_str()) {
            debug!("[{}] up to date at {}", key, api_version);
            return Ok(EntryOutcome::Unchanged);
        }

        let spec_path = self.persist(entry, &api_version, &content, result.spec_format())?;
        let update = UpdateResult {
            vendor: entry.vendor.clone(),
            api: entry.api.clone(),
            old_version: old_version.unwrap_or_else(|| "none".to_string()),
            new_version: api_version.clone(),
            api_version: api_version.clone(),
            spec_path,
        };

        if !self.config.dry_run {
            if fallback {
                entry.set_last_api_version(api_version);
            } else {
                entry.set_last_known_version(api_version);
            }
            if fresh {
                entry.cache_findings(result);
            }
        }
        Ok(EntryOutcome::Updated(update))
    }

    fn process_hybrid(&self, entry: &mut TrackedEntry) -> Result<EntryOutcome, PipelineError> {
        match self.process_structured(entry) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                if entry.documentation_url().is_none() {
                    return Err(PipelineError::NoFallback(Box::new(e)));
                }
                warn!("[{}] structured source failed, falling back to discovery: {}", entry.key(), e);
                self.discover_and_update(entry, true)
            }
        }
    }

    /// GET a URL, accepting only 200 OK
    fn download(&self, url: &str) -> Result<String, PipelineError> {
        let fetched = self.fetcher.get(url).map_err(|e| PipelineError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if !fetched.is_ok() {
            return Err(PipelineError::Download {
                url: url.to_string(),
                status: fetched.status,
            });
        }
        Ok(fetched.body)
    }

    /// Write the spec into the archive, or only report it in dry-run mode
    fn persist(
        &self,
        entry: &TrackedEntry,
        version: &str,
        content: &str,
        format: SpecFormat,
    ) -> Result<PathBuf, PipelineError> {
        let name = if entry.name.trim().is_empty() {
            entry.key()
        } else {
            entry.name.clone()
        };
        let artifact = SpecArtifact {
            vendor: &entry.vendor,
            api: &entry.api,
            version,
            content,
            format,
            name: &name,
            metadata: &entry.metadata,
        };

        if self.config.dry_run {
            let path = self
                .archive
                .spec_path(&artifact)
                .map_err(|e| PipelineError::Persist(e.to_string()))?;
            info!("  DRY RUN: would persist {} ({} bytes)", path.display(), content.len());
            return Ok(path);
        }

        let persisted = self
            .archive
            .persist(&artifact)
            .map_err(|e| PipelineError::Persist(e.to_string()))?;
        if let Some(e) = &persisted.metadata_error {
            warn!("  metadata sidecar not written: {}", e);
        }
        info!("  saved {}", persisted.spec_path.display());
        Ok(persisted.spec_path)
    }
}

/// Cached findings good enough to skip the discovery service
fn cached_high_confidence(entry: &TrackedEntry) -> Option<&DiscoveryResult> {
    entry
        .cached_findings()
        .filter(|found| found.confidence == Confidence::High && !found.download_url.trim().is_empty())
}
