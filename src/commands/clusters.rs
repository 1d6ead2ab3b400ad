// ABOUTME: `shoc clusters` subcommands
// ABOUTME: List, register and delete Kubernetes clusters

use anyhow::{Context, Result};
use clap::Subcommand;
use dialoguer::Confirm;
use shoc_executor_client::{CreateKubernetesCluster, ExecutorClient};
use std::path::PathBuf;
use tracing::info;

use super::print_json;

#[derive(Subcommand, Debug)]
pub enum ClustersCommand {
    /// List registered clusters
    List {
        /// Only clusters with this name
        #[arg(long)]
        name: Option<String>,
    },
    /// Register a cluster
    Create {
        #[arg(long)]
        name: String,
        /// Kubernetes API server address
        #[arg(long)]
        api_server: String,
        /// Kubeconfig file handed to the executor
        #[arg(long)]
        kubeconfig: Option<PathBuf>,
    },
    /// Remove a registered cluster
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub async fn run(client: &ExecutorClient, token: &str, command: ClustersCommand) -> Result<i32> {
    match command {
        ClustersCommand::List { name } => {
            let clusters = client
                .get_clusters(token, name.as_deref())
                .await
                .context("Failed to list clusters")?;
            print_json(&clusters)?;
        }
        ClustersCommand::Create {
            name,
            api_server,
            kubeconfig,
        } => {
            let kube_config = match kubeconfig {
                Some(path) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                None => None,
            };
            let input = CreateKubernetesCluster {
                name,
                api_server_uri: api_server,
                kube_config,
            };
            let cluster = client
                .create_cluster(token, &input)
                .await
                .context("Failed to register cluster")?;
            print_json(&cluster)?;
        }
        ClustersCommand::Delete { id, yes } => {
            if !yes
                && !Confirm::new()
                    .with_prompt(format!("Delete cluster {}?", id))
                    .default(false)
                    .interact()?
            {
                info!("Cluster {} kept", id);
                return Ok(0);
            }
            let cluster = client
                .delete_cluster(token, &id)
                .await
                .with_context(|| format!("Failed to delete cluster {}", id))?;
            print_json(&cluster)?;
        }
    }
    Ok(0)
}
