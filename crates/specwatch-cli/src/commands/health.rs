//! Agent health command implementation.

use crate::config::Config;
use crate::error::Result;
use specwatch_agent::AgentDiscoveryClient;
use tracing::info;

/// Execute the agent-health command.
///
/// Returns whether the discovery service reports itself healthy.
pub fn execute_agent_health(config: &Config) -> Result<bool> {
    let client = AgentDiscoveryClient::with_timeout(&config.agent.endpoint, config.timeout())?;
    info!("Probing discovery service at {}", client.endpoint());
    Ok(client.health()?)
}
