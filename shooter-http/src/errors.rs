//! Engine client error types

/// Error type for engine client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Engine returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
}
