//! Run command implementation.

use crate::config::Config;
use crate::error::Result;
use specwatch_agent::AgentDiscoveryClient;
use specwatch_github::{GitHubClient, HttpFetcher};
use specwatch_pipeline::{RunReport, UpdatePipeline};
use specwatch_store::{RegistryManager, SpecStore};
use tracing::info;

/// Execute the run command.
///
/// Loads the registry, processes every entry, then writes the registry and
/// the change summary back. Entry failures are part of the report; only
/// setup and write-back failures are errors.
pub fn execute_run(config: &Config, token: &str) -> Result<RunReport> {
    let registry = RegistryManager::new(&config.registry_path, &config.summary_path);
    let mut entries = registry.load()?;

    let timeout = config.timeout();
    let pipeline = UpdatePipeline::new(
        GitHubClient::with_settings(&config.github.api_base, token, timeout)?,
        HttpFetcher::with_timeout(timeout)?.with_github_token(token),
        AgentDiscoveryClient::with_timeout(&config.agent.endpoint, timeout)?,
        SpecStore::new(&config.archive_root),
        config.pipeline_config(),
    );

    let report = pipeline.run(&mut entries);

    if config.dry_run {
        info!("DRY RUN: registry and summary left untouched");
        return Ok(report);
    }

    registry.save(&entries)?;
    if registry.write_summary(&report.updates)? {
        info!("Wrote change summary to {}", registry.summary_path().display());
    }
    Ok(report)
}
