// ABOUTME: Command-line entry point for the Shoc executor client
// ABOUTME: Parses arguments, sets up logging and discovery, dispatches subcommands

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shoc_executor_client::{ClientConfig, EnvLocator, ExecutorClient, StaticLocator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use commands::clusters::ClustersCommand;
use commands::jobs::JobsCommand;

#[derive(Parser, Debug)]
#[command(name = "shoc", version, about = "Run and watch jobs on the Shoc executor")]
struct Cli {
    /// Client configuration file (TOML)
    #[arg(long, global = true, env = "SHOC_CONFIG")]
    config: Option<PathBuf>,

    /// Bearer token sent with every request
    #[arg(long, global = true, env = "SHOC_TOKEN", hide_env_values = true, default_value = "")]
    token: String,

    /// Logical name of the executor service
    #[arg(long, global = true, default_value = shoc_executor_client::DEFAULT_SERVICE)]
    service: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create, deploy, inspect and watch jobs
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Manage Kubernetes clusters registered with the executor
    #[command(subcommand)]
    Clusters(ClustersCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.token.is_empty() {
        anyhow::bail!("No access token given. Pass --token or set SHOC_TOKEN");
    }

    let config = match &cli.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ClientConfig::default(),
    };

    let locator =
        EnvLocator::new().with_fallback(Arc::new(StaticLocator::from_config(&config)));
    let client = ExecutorClient::for_service(&config, cli.service.as_str(), Arc::new(locator))
        .context("Failed to create executor client")?;

    let code = match cli.command {
        Commands::Jobs(command) => commands::jobs::run(&client, &cli.token, command).await?,
        Commands::Clusters(command) => {
            commands::clusters::run(&client, &cli.token, command).await?
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
