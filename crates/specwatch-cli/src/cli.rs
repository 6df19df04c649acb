//! CLI command definitions and argument parsing.

use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// specwatch - Track upstream OpenAPI specs and archive every new version.
#[derive(Debug, Parser)]
#[command(name = "specwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ./specwatch.toml if present)
    #[arg(short, long, global = true, env = "SPECWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Registry document path
    #[arg(long, global = true)]
    pub registry: Option<PathBuf>,

    /// Archive root directory
    #[arg(long, global = true)]
    pub archive: Option<PathBuf>,

    /// Change summary path
    #[arg(long, global = true)]
    pub summary: Option<PathBuf>,

    /// Download and extract, but write nothing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Discovery service endpoint
    #[arg(long, global = true, env = "SPECWATCH_AGENT_ENDPOINT")]
    pub agent_endpoint: Option<String>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check every tracked entry and archive new specs (default)
    Run,

    /// Ask the discovery service about one API and print a registry entry
    Discover(DiscoverArgs),

    /// Probe the discovery service health endpoint
    AgentHealth,
}

/// Arguments for the discover command.
#[derive(Debug, Clone, Args)]
pub struct DiscoverArgs {
    /// Vendor id (e.g. stripe)
    #[arg(long)]
    pub vendor: String,

    /// API id (e.g. payments)
    #[arg(long)]
    pub api: String,

    /// Documentation page to analyse
    #[arg(long)]
    pub doc_url: String,

    /// Hint for the discovery service (repeatable)
    #[arg(long = "hint")]
    pub hints: Vec<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.registry {
            config.registry_path = path.clone();
        }
        if let Some(path) = &self.archive {
            config.archive_root = path.clone();
        }
        if let Some(path) = &self.summary {
            config.summary_path = path.clone();
        }
        if let Some(endpoint) = &self.agent_endpoint {
            config.agent.endpoint = endpoint.clone();
        }
        if self.dry_run {
            config.dry_run = true;
        }
    }
}
