// ABOUTME: Service discovery: resolves a logical service name to a base URL
// ABOUTME: Provides a config-backed locator and an environment-variable locator

use async_trait::async_trait;
use reqwest::Url;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ExecutorError, Result};

/// Prefix of the environment variables read by [`EnvLocator`].
pub const ENV_PREFIX: &str = "SHOC_SERVICE_";

#[async_trait]
pub trait ServiceLocator: Send + Sync {
    /// Returns an absolute base URL ending with `/` for `service`.
    async fn resolve(&self, service: &str) -> Result<Url>;
}

/// Resolves services from a fixed table, usually the `[services]` section of
/// the client configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    services: HashMap<String, String>,
}

impl StaticLocator {
    pub fn new(services: HashMap<String, String>) -> Self {
        Self { services }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.services.clone())
    }

    pub fn with(mut self, service: impl Into<String>, url: impl Into<String>) -> Self {
        self.services.insert(service.into(), url.into());
        self
    }
}

#[async_trait]
impl ServiceLocator for StaticLocator {
    async fn resolve(&self, service: &str) -> Result<Url> {
        match self.services.get(service) {
            Some(raw) => parse_base_url(service, raw),
            None => Err(ExecutorError::resolution(
                service,
                "service is not registered in the configuration",
            )),
        }
    }
}

/// Resolves `shoc-executor` from `SHOC_SERVICE_SHOC_EXECUTOR`, and so on.
#[derive(Clone, Default)]
pub struct EnvLocator {
    fallback: Option<Arc<dyn ServiceLocator>>,
}

impl EnvLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consulted when the environment variable is unset.
    pub fn with_fallback(mut self, fallback: Arc<dyn ServiceLocator>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn variable_name(service: &str) -> String {
        let suffix: String = service
            .chars()
            .map(|c| match c {
                '-' | '.' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        format!("{}{}", ENV_PREFIX, suffix)
    }
}

#[async_trait]
impl ServiceLocator for EnvLocator {
    async fn resolve(&self, service: &str) -> Result<Url> {
        let variable = Self::variable_name(service);
        match std::env::var(&variable) {
            Ok(raw) if !raw.trim().is_empty() => {
                debug!("resolved {} from {}", service, variable);
                parse_base_url(service, &raw)
            }
            _ => match &self.fallback {
                Some(fallback) => fallback.resolve(service).await,
                None => Err(ExecutorError::resolution(
                    service,
                    format!("{} is not set", variable),
                )),
            },
        }
    }
}

/// Parses an absolute http(s) URL and makes sure its path ends with `/`, so
/// relative API paths are joined beneath it instead of replacing its last
/// segment.
pub fn parse_base_url(service: &str, raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ExecutorError::resolution(service, format!("invalid url '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ExecutorError::resolution(
            service,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
