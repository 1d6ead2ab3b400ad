// ABOUTME: HTTP plumbing shared by the executor operations
// ABOUTME: Resolves the service URL, builds authenticated requests, guards sends and maps responses

use reqwest::{Client, Method, Request, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::discovery::ServiceLocator;
use crate::error::{ExecutorError, Result};

/// A client bound to one logical service. Holds no per-call state; the bearer
/// token is passed to every call and never stored.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    service: String,
    locator: Arc<dyn ServiceLocator>,
    request_timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        service: impl Into<String>,
        locator: Arc<dyn ServiceLocator>,
    ) -> Result<Self> {
        // No overall timeout on the client: it would cut long-lived watch streams.
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(ExecutorError::Transport)?;

        Ok(Self {
            http,
            service: service.into(),
            locator,
            request_timeout: config.request_timeout(),
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Absolute URL made of the resolved base URL followed by `segments`.
    /// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside
    /// an identifier never change the target resource.
    pub async fn api_url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ExecutorError::InvalidArgument(format!(
                "'{}' is not a valid path segment",
                bad
            )));
        }

        let mut url = self.locator.resolve(&self.service).await?;
        url.path_segments_mut()
            .map_err(|_| ExecutorError::resolution(&self.service, "base url cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn build_message<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        token: &str,
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.http.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder.build().map_err(ExecutorError::InvalidRequest)
    }

    /// Sends the request; connection-level faults come back as
    /// [`ExecutorError::Transport`]. Returns once response headers are read.
    pub async fn send_guarded(&self, request: Request) -> Result<Response> {
        debug!("{} {}", request.method(), request.url());
        let url = request.url().clone();
        self.http.execute(request).await.map_err(|e| {
            error!("request to {} failed: {}", url, e);
            ExecutorError::Transport(e)
        })
    }

    /// Resolve, build, send and map in one step.
    pub async fn call<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        token: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.api_url(segments).await?;
        self.call_url(method, url, body, token).await
    }

    pub async fn call_url<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        token: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut message = self.build_message(method, url, body, token)?;
        *message.timeout_mut() = self.request_timeout;

        let response = self.send_guarded(message).await?;
        map_response(response).await
    }
}

/// Turns a non-success response into [`ExecutorError::Remote`], consuming its
/// body; success responses are handed back untouched.
pub async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!("could not read error body of {} response: {}", status, e);
            String::new()
        }
    };
    warn!("request failed with status {}: {}", status, body);
    Err(ExecutorError::Remote { status, body })
}

pub async fn map_response<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await.map_err(ExecutorError::Transport)?;
    Ok(serde_json::from_slice(&bytes)?)
}
