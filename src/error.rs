use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Anything that stops the editor from starting
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to create http client: {0}")]
    Client(#[from] ApiError),

    #[error("ui error: {0}")]
    Ui(#[from] iced::Error),
}
