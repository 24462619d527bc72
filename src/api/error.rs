use thiserror::Error;

use crate::state::errors::FieldErrors;

/// Failures talking to the gallery admin endpoint
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid base url: {0}")]
    BadBaseUrl(String),

    /// 422 without field errors; holds the server's message
    #[error("{0}")]
    Rejected(String),

    #[error("unexpected response status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode album: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Outcome of a rejected submit
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The server refused the payload and said why, per field
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}
