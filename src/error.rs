// ABOUTME: Error type shared by every executor client operation
// ABOUTME: Separates resolution, transport, remote status, stream and handler failures

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed error returned by a caller-supplied watch line handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, ExecutorError>;

#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The logical service name could not be turned into a base URL.
    #[error("could not resolve service '{service}': {reason}")]
    Resolution { service: String, reason: String },

    /// The service answered with a non-success status.
    #[error("remote service responded with {status}: {body}")]
    Remote { status: StatusCode, body: String },

    /// Connection-level failure (refused, reset, DNS, timeout).
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(#[source] reqwest::Error),

    /// A caller-supplied argument cannot be sent, such as an id of `..`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading the watch stream failed after the connection was established.
    #[error("watch stream failed: {0}")]
    Stream(#[source] std::io::Error),

    /// The watch line handler returned an error.
    #[error("line handler failed: {0}")]
    Handler(#[source] BoxError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ExecutorError {
    pub fn resolution(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            service: service.into(),
            reason: reason.into(),
        }
    }

    /// Status code of a remote error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }

    pub fn is_server_error(&self) -> bool {
        self.status().map(|s| s.is_server_error()).unwrap_or(false)
    }
}
