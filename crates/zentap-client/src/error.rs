//! Generation client error types.

use thiserror::Error;

/// Errors from the generation API collaborator.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("generation transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status from the provider or proxy.
    #[error("generation API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The response parsed but carried no completion text.
    #[error("generation response carried no completion text")]
    EmptyCompletion,

    /// The client was constructed with unusable configuration.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for generation calls.
pub type ClientResult<T> = Result<T, ClientError>;
