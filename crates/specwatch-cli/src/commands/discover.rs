//! Discover command implementation.

use crate::cli::DiscoverArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use specwatch_agent::AgentDiscoveryClient;
use specwatch_domain::traits::DiscoveryService;
use specwatch_domain::{DiscoveryRequest, DiscoveryResult, TrackedEntry};
use tracing::{info, warn};

/// Execute the discover command.
///
/// Calls the discovery service once and returns a registry entry built from
/// its answer. Nothing is downloaded or written.
pub fn execute_discover(args: &DiscoverArgs, config: &Config) -> Result<TrackedEntry> {
    let request = build_request(args)?;
    let client = AgentDiscoveryClient::with_timeout(&config.agent.endpoint, config.timeout())?;

    info!("Discovering {}/{} from {}", request.vendor, request.api, request.documentation_url);
    let result = client.discover(&request)?;
    if !result.confidence.is_actionable() {
        warn!("Low confidence result, review before adding: {}", result.reasoning);
    }

    Ok(build_entry(args, result))
}

fn build_request(args: &DiscoverArgs) -> Result<DiscoveryRequest> {
    for (name, value) in [("vendor", &args.vendor), ("api", &args.api), ("doc-url", &args.doc_url)] {
        if value.trim().is_empty() {
            return Err(CliError::InvalidInput(format!("--{} must not be empty", name)));
        }
    }
    Ok(DiscoveryRequest {
        vendor: args.vendor.trim().to_string(),
        api: args.api.trim().to_string(),
        documentation_url: args.doc_url.trim().to_string(),
        hints: args.hints.clone(),
    })
}

/// Registry entry for a discovery answer, carrying the hints that produced it
fn build_entry(args: &DiscoverArgs, result: DiscoveryResult) -> TrackedEntry {
    let mut entry = TrackedEntry::from_discovery(args.vendor.trim(), args.api.trim(), args.doc_url.trim(), result);
    if let Some(context) = entry.agent_context.as_mut() {
        context.hints = args.hints.clone();
    }
    entry
}
