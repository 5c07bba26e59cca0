use std::path::PathBuf;

use shared::error::ApiException;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// User input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Server(#[from] ApiException),
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
