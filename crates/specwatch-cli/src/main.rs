//! specwatch - OpenAPI spec update monitor.

use anyhow::{bail, Context};
use clap::Parser;
use specwatch_cli::commands;
use specwatch_cli::{Cli, Command, Config};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let token = config.resolve_token(|name| std::env::var(name).ok())?;
            let report = commands::execute_run(&config, &token)
                .with_context(|| format!("Update run against {} failed", config.registry_path.display()))?;
            println!("Found {} update(s)", report.update_count());
            println!("{}", report.summary());
        }
        Command::Discover(args) => {
            let entry = commands::execute_discover(&args, &config).context("Discovery failed")?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        Command::AgentHealth => {
            if !commands::execute_agent_health(&config)? {
                bail!("Discovery service at {} is not healthy", config.agent.endpoint);
            }
            println!("Discovery service at {} is healthy", config.agent.endpoint);
        }
    }

    Ok(())
}
