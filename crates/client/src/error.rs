//! Error types for backend requests.

use thiserror::Error;

/// Result type alias using our ClientError type.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused, DNS failure, broken transfer, and the like.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with `{ "error": ... }`.
    #[error("Server error: {0}")]
    Server(String),

    /// Non-success status whose body was not a recognisable error object.
    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the JSON we expected.
    #[error("Server returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Generated image payload was not valid base64.
    #[error("Invalid image data: {0}")]
    InvalidImage(#[from] base64::DecodeError),

    /// Failed to read a file for upload.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Bad base URL or other configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Local validation rejected the request before sending it.
    #[error(transparent)]
    Rejected(#[from] slideqa_core::Error),
}
