use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use std::time::Duration;

use super::error::{ApiError, SubmitError};
use super::FormSubmitter;
use crate::config::Config;
use crate::state::data::Album;
use crate::state::errors::FieldErrors;
use crate::state::form::AlbumPayload;

/// Route prefix of the album admin resource
const ALBUMS_PATH: &str = "admin/gallery-albums";

/// HTTP client for the gallery admin endpoint
///
/// Loads one album and sends updates back to the same resource URL.
#[derive(Debug, Clone)]
pub struct GalleryClient {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl GalleryClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// URL of one album resource
    pub fn album_url(&self, album_id: u64) -> Result<Url, ApiError> {
        let raw = format!(
            "{}/{ALBUMS_PATH}/{album_id}",
            self.base_url.trim_end_matches('/')
        );
        Url::parse(&raw).map_err(|e| ApiError::BadBaseUrl(format!("{raw}: {e}")))
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Fetch the album record the form starts from
    pub async fn fetch_album(&self, album_id: u64) -> Result<Album, ApiError> {
        let url = self.album_url(album_id)?;
        tracing::info!(%url, "loading album");

        let response = self.request(reqwest::Method::GET, url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl FormSubmitter for GalleryClient {
    async fn submit(&self, album_id: u64, payload: &AlbumPayload) -> Result<(), SubmitError> {
        let url = self.album_url(album_id)?;
        tracing::info!(%url, "updating album");

        let response = self
            .request(reqwest::Method::PUT, url)
            .json(payload)
            .send()
            .await
            .map_err(ApiError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.map_err(ApiError::from)?;
        submit_result(status, body)
    }
}

/// Map an update response onto the submit result
///
/// 2xx is success. 422 carries field errors; a 422 without any becomes
/// [`ApiError::Rejected`] with the body's `message` so it is still shown.
/// Every other status is [`ApiError::Status`].
fn submit_result(status: StatusCode, body: String) -> Result<(), SubmitError> {
    if status.is_success() {
        return Ok(());
    }

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        let errors = FieldErrors::from_validation_body(&body);
        tracing::warn!(count = errors.len(), "album update rejected");
        if errors.is_empty() {
            let message = FieldErrors::validation_message(&body)
                .unwrap_or_else(|| "the server rejected the update".to_string());
            return Err(ApiError::Rejected(message).into());
        }
        return Err(SubmitError::Validation(errors));
    }

    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    }
    .into())
}
