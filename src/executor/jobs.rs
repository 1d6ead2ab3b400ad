// ABOUTME: Job operations of the executor client
// ABOUTME: Fetch, create, deploy and watch the live output of a job

use futures::TryStreamExt;
use reqwest::Method;
use std::io;
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::watch::{pump_lines, HandlerResult, WatchEnd, WATCH_EXIT_OK};
use super::ExecutorClient;
use crate::error::Result;
use crate::remote::client::ensure_success;
use crate::remote::models::{CreateJobInput, Job};

impl ExecutorClient {
    pub async fn get_job_by_id(&self, token: &str, id: &str) -> Result<Job> {
        self.api
            .call(Method::GET, &["api", "jobs", id], None::<&()>, token)
            .await
    }

    /// Creates a job for a project. Not idempotent: after an ambiguous failure
    /// (say, a timeout once the request was sent) the job may exist remotely.
    pub async fn create_project_job(&self, token: &str, input: &CreateJobInput) -> Result<Job> {
        let job: Job = self
            .api
            .call(Method::POST, &["api", "jobs"], Some(input), token)
            .await?;
        info!("created job {} for project {}", job.id, input.project_id);
        Ok(job)
    }

    /// Triggers deployment of an existing job.
    pub async fn deploy_project(&self, token: &str, id: &str) -> Result<Job> {
        let job: Job = self
            .api
            .call(Method::POST, &["api", "jobs", id], None::<&()>, token)
            .await?;
        info!("deploying job {}", job.id);
        Ok(job)
    }

    /// Streams the live output of job `id`, one line per `on_line` call, until
    /// the service closes the stream or `cancel` fires.
    ///
    /// Returns [`WATCH_EXIT_OK`] in both cases; check `cancel.is_cancelled()` to
    /// tell them apart. A failing handler stops the watch and its error is
    /// returned as [`ExecutorError::Handler`](crate::ExecutorError::Handler).
    /// The connection is closed before this returns, whatever the outcome.
    pub async fn watch_job<F>(
        &self,
        token: &str,
        id: &str,
        mut on_line: F,
        cancel: &CancellationToken,
    ) -> Result<i32>
    where
        F: FnMut(String) -> HandlerResult,
    {
        let url = self.api.api_url(&["api", "jobs", id, "watch"]).await?;
        let message = self.api.build_message(Method::GET, url, None::<&()>, token)?;

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("watch of job {} cancelled while connecting", id);
                return Ok(WATCH_EXIT_OK);
            }
            response = self.api.send_guarded(message) => response?,
        };
        let response = ensure_success(response).await?;
        info!("watching job {}", id);

        let stream = response
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
        let reader = StreamReader::new(Box::pin(stream));

        match pump_lines(reader, cancel, self.watch_idle_timeout, &mut on_line).await? {
            WatchEnd::Completed => info!("job {} output ended", id),
            WatchEnd::Cancelled => info!("stopped watching job {}", id),
        }

        Ok(WATCH_EXIT_OK)
    }
}
