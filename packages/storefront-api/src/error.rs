//! Error types for the storefront API client.

use thiserror::Error;

/// Result type for storefront API operations.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors surfaced by remotes and mappers.
///
/// Transport failures (no response at all) and decoding failures (a response
/// that is malformed or error-shaped) are both reported through this type.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection failed, timed out, or the request never completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend replied with no payload.
    #[error("empty response")]
    EmptyResponse,

    /// Non-2xx status whose body is not a recognised error document.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The backend returned a structured error document.
    #[error("remote error `{code}`: {message}")]
    Remote { code: String, message: String },

    /// The payload did not match the expected shape.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// The request could not be built (bad base URL, bad parameters).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl NetworkError {
    /// True when the backend was never reached or sent nothing back.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::EmptyResponse)
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decoding(err.to_string())
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            Self::Decoding(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
