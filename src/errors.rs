use aws_sdk_s3::error::DisplayErrorContext;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("{operation} request failed: {detail}")]
    Provider {
        operation: &'static str,
        detail: String,
        #[source]
        source: BoxError,
    },

    #[error("{operation} timed out after {}s", .after.as_secs_f64())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed secret payload for '{secret}': {reason}")]
    MalformedSecretPayload { secret: String, reason: String },

    #[error("No URL returned for queue '{0}'")]
    MissingQueueUrl(String),

    #[error("Message was not sent. Payload: {payload}")]
    MessageNotSent { payload: String },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot set environment variable '{key}': {reason}")]
    Environment { key: String, reason: String },

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;

impl CloudError {
    /// Wrap an SDK failure, keeping the original error as the source.
    pub fn provider<E>(operation: &'static str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let detail = DisplayErrorContext(&err).to_string();
        CloudError::Provider {
            operation,
            detail,
            source: Box::new(err),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CloudError::Io {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CloudError::Timeout { .. })
    }
}
