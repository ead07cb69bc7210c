//! Error types for the blog API client.
//!
//! # Design
//! `ApiError` covers only what the core itself detects while building a
//! request or reading a response. Non-2xx responses are not classified:
//! the raw status and body are kept in `HttpError` for the caller to
//! inspect. Transport failures never pass through this type; see
//! [`Transport`](crate::Transport).

use thiserror::Error;

/// Errors raised by `build_*` and `parse_*` methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Errors raised while loading [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client environment: {0}")]
    Env(#[from] envy::Error),
}
