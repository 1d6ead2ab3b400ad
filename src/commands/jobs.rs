// ABOUTME: `shoc jobs` subcommands
// ABOUTME: Get, create, deploy and watch jobs; Ctrl-C cancels a watch

use anyhow::{Context, Result};
use clap::Subcommand;
use shoc_executor_client::{CancellationToken, CreateJobInput, ExecutorClient, ShocManifest};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use super::{print_json, spinner};

#[derive(Subcommand, Debug)]
pub enum JobsCommand {
    /// Show a job
    Get { id: String },
    /// Create a job for a project
    Create {
        /// Project identifier
        #[arg(long)]
        project: String,
        /// Project manifest providing default run arguments and cluster
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Cluster to run on
        #[arg(long)]
        cluster: Option<String>,
        /// Arguments passed to the job, after `--`
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Deploy an existing job
    Deploy { id: String },
    /// Stream the live output of a job
    Watch { id: String },
}

pub async fn run(client: &ExecutorClient, token: &str, command: JobsCommand) -> Result<i32> {
    match command {
        JobsCommand::Get { id } => {
            let job = client
                .get_job_by_id(token, &id)
                .await
                .with_context(|| format!("Failed to get job {}", id))?;
            print_json(&job)?;
        }
        JobsCommand::Create {
            project,
            manifest,
            cluster,
            args,
        } => {
            let input = job_input(&project, manifest, cluster, args)?;
            let progress = spinner("Creating job");
            let job = client.create_project_job(token, &input).await;
            progress.finish_and_clear();
            print_json(&job.context("Failed to create job")?)?;
        }
        JobsCommand::Deploy { id } => {
            let progress = spinner("Deploying job");
            let job = client.deploy_project(token, &id).await;
            progress.finish_and_clear();
            print_json(&job.with_context(|| format!("Failed to deploy job {}", id))?)?;
        }
        JobsCommand::Watch { id } => return watch(client, token, &id).await,
    }
    Ok(0)
}

fn job_input(
    project: &str,
    manifest: Option<PathBuf>,
    cluster: Option<String>,
    args: Vec<String>,
) -> Result<CreateJobInput> {
    let mut input = match manifest {
        Some(path) => ShocManifest::load(&path)?.job_input(project, cluster),
        None => CreateJobInput {
            project_id: project.to_string(),
            cluster_id: cluster,
            ..Default::default()
        },
    };
    if !args.is_empty() {
        input.args = args;
    }
    Ok(input)
}

async fn watch(client: &ExecutorClient, token: &str, id: &str) -> Result<i32> {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let stdout = std::io::stdout();
    let code = client
        .watch_job(
            token,
            id,
            |line| {
                let mut out = stdout.lock();
                writeln!(out, "{}", line)?;
                out.flush()?;
                Ok(())
            },
            &cancel,
        )
        .await
        .with_context(|| format!("Failed to watch job {}", id))?;

    if cancel.is_cancelled() {
        info!("Watch interrupted");
    }
    Ok(code)
}
