use serde::{Deserialize, Serialize};
use thiserror::Error;

/// FastAPI-style error envelope returned on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub detail: serde_json::Value,
}

impl ApiError {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error)]
#[error("server returned {status}: {message}")]
pub struct ApiException {
    pub status: u16,
    pub message: String,
}

impl ApiException {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Builds an exception from a raw response body, preferring the `detail` envelope.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiError>(body)
            .map(|err| err.message())
            .unwrap_or_else(|_| body.trim().to_string());
        Self::new(status, message)
    }
}
