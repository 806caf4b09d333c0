//! Error types for the Quill content facade.

use thiserror::Error;

/// Errors surfaced by the facade, its transports, and the ambient layers.
///
/// The facade never re-wraps transport errors: whatever a [`GraphqlTransport`]
/// returns reaches the caller as-is.
///
/// [`GraphqlTransport`]: crate::transport::GraphqlTransport
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP status {status} from content backend: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("GraphQL errors: {}", messages.join("; "))]
    Graphql { messages: Vec<String> },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to submit comment (HTTP {status})")]
    CommentRejected { status: u16 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ContentError {
    /// True when the error came from the network or the remote backend
    /// rather than from local input or configuration.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ContentError::Http(_)
                | ContentError::HttpStatus { .. }
                | ContentError::Graphql { .. }
                | ContentError::CommentRejected { .. }
        )
    }
}

impl From<reqwest::Error> for ContentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ContentError::Http(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            ContentError::Http(format!("Connection error: {}", err))
        } else if err.is_decode() {
            ContentError::Decode(err.to_string())
        } else {
            ContentError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        ContentError::Decode(err.to_string())
    }
}

impl From<config::ConfigError> for ContentError {
    fn from(err: config::ConfigError) -> Self {
        ContentError::Config(err.to_string())
    }
}
