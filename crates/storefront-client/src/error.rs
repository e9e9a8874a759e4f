//! # Client Error Types
//!
//! Failures while fetching a product document.
//!
//! ```text
//! reqwest::Error (network, TLS, timeout)  → ClientError::Http
//! HTTP 404                                → ClientError::NotFound
//! other non-2xx                           → ClientError::UnexpectedStatus
//! body not a product document             → ClientError::Deserialize
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("product not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// Whether a later attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Http(_) => true,
            ClientError::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
