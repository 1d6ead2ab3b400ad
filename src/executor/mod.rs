// ABOUTME: Client for the Shoc executor service
// ABOUTME: Job lifecycle, live job output and Kubernetes cluster registration

mod clusters;
mod jobs;
pub mod watch;

use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::discovery::ServiceLocator;
use crate::error::Result;
use crate::remote::client::ApiClient;

pub use watch::{HandlerResult, WatchEnd, WATCH_EXIT_OK};

/// Logical name the executor registers under in discovery.
pub const DEFAULT_SERVICE: &str = "shoc-executor";

/// Every call resolves the service address, sends one request with the
/// caller's bearer token and returns a fresh value. Nothing is cached and
/// nothing is retried.
#[derive(Clone)]
pub struct ExecutorClient {
    api: ApiClient,
    watch_idle_timeout: Option<Duration>,
}

impl ExecutorClient {
    pub fn new(config: &ClientConfig, locator: Arc<dyn ServiceLocator>) -> Result<Self> {
        Self::for_service(config, DEFAULT_SERVICE, locator)
    }

    /// Same as [`ExecutorClient::new`] for an executor registered under
    /// another name.
    pub fn for_service(
        config: &ClientConfig,
        service: impl Into<String>,
        locator: Arc<dyn ServiceLocator>,
    ) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config, service, locator)?,
            watch_idle_timeout: config.watch_idle_timeout(),
        })
    }

    pub fn service(&self) -> &str {
        self.api.service()
    }
}
