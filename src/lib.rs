// ABOUTME: Library root of the Shoc executor client
// ABOUTME: Re-exports the client, its models, discovery and configuration

pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod manifest;
pub mod remote;

pub use config::ClientConfig;
pub use discovery::{EnvLocator, ServiceLocator, StaticLocator};
pub use error::{BoxError, ExecutorError, Result};
pub use executor::{ExecutorClient, HandlerResult, DEFAULT_SERVICE, WATCH_EXIT_OK};
pub use manifest::ShocManifest;
pub use remote::models::{CreateJobInput, CreateKubernetesCluster, Job, KubernetesCluster};
pub use tokio_util::sync::CancellationToken;
