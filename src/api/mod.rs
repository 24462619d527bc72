/// Collaborators on the network side of the form
///
/// The form only knows the [`FormSubmitter`] seam. [`GalleryClient`] is the
/// HTTP implementation used by the application.

mod client;
mod error;

pub use client::GalleryClient;
pub use error::{ApiError, SubmitError};

use async_trait::async_trait;
use std::sync::Arc;

use crate::state::errors::FieldErrors;
use crate::state::form::AlbumPayload;

/// Sends a finished form to the server
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    /// Update album `album_id` with `payload`
    ///
    /// Validation failures come back as [`SubmitError::Validation`].
    async fn submit(&self, album_id: u64, payload: &AlbumPayload) -> Result<(), SubmitError>;
}

/// What a submit ended with, in a form the UI can carry in a message
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved,
    Rejected(FieldErrors),
    Failed(String),
}

impl From<Result<(), SubmitError>> for SubmitOutcome {
    fn from(result: Result<(), SubmitError>) -> Self {
        match result {
            Ok(()) => SubmitOutcome::Saved,
            Err(SubmitError::Validation(errors)) => SubmitOutcome::Rejected(errors),
            Err(SubmitError::Api(e)) => SubmitOutcome::Failed(e.to_string()),
        }
    }
}

/// Run one submit and log how it went
pub async fn submit_album(
    submitter: Arc<dyn FormSubmitter>,
    album_id: u64,
    payload: AlbumPayload,
) -> SubmitOutcome {
    let outcome = SubmitOutcome::from(submitter.submit(album_id, &payload).await);
    match &outcome {
        SubmitOutcome::Saved => tracing::info!(album_id, "album updated"),
        SubmitOutcome::Rejected(errors) if errors.is_empty() => {
            tracing::warn!(album_id, "album update rejected without field errors")
        }
        SubmitOutcome::Rejected(errors) => {
            for (path, message) in errors.iter() {
                tracing::debug!(path, message, "validation error");
            }
        }
        SubmitOutcome::Failed(reason) => tracing::error!(album_id, %reason, "album update failed"),
    }
    outcome
}
