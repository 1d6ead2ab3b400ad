// ABOUTME: Client configuration loaded from a TOML file
// ABOUTME: Holds static service addresses, client identity and transport timeouts

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{ExecutorError, Result};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Sent as the User-Agent prefix on every request.
    pub client_name: String,
    /// Logical service name to base URL.
    pub services: HashMap<String, String>,
    pub connect_timeout_secs: u64,
    /// Applies to unary calls only; a watch is never cut by it.
    pub request_timeout_secs: Option<u64>,
    /// Longest wait for the next line of a watch. Unbounded when unset.
    pub watch_idle_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_name: default_client_name(),
            services: HashMap::new(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            watch_idle_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ExecutorError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
            .map_err(|e| ExecutorError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: ClientConfig =
            toml::from_str(raw).map_err(|e| ExecutorError::Config(e.to_string()))?;
        Ok(config.normalize())
    }

    pub fn with_service(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.services.insert(name.into(), url.into());
        self.normalize()
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn watch_idle_timeout(&self) -> Option<Duration> {
        self.watch_idle_timeout_secs.map(Duration::from_secs)
    }

    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.client_name, env!("CARGO_PKG_VERSION"))
    }

    fn normalize(mut self) -> Self {
        self.services = self
            .services
            .into_iter()
            .filter_map(|(name, url)| {
                let trimmed = url.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some((name, trimmed.to_string()))
                }
            })
            .collect();
        if self.client_name.trim().is_empty() {
            self.client_name = default_client_name();
        }
        self
    }
}

fn default_client_name() -> String {
    "shoc-cli".to_string()
}
