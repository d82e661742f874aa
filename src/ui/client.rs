use crate::server::types::{ErrorResponse, TranslationRequest, TranslationResponse};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failures the UI can hit while talking to the translation service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The service could not be reached at all.
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("API error {status}")]
    Api { status: u16, detail: Option<String> },

    #[error("Invalid API response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Connection(e.to_string())
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Connection(e.to_string())
        }
    }
}

/// Thin client for `POST /translate`. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    translate_url: String,
}

impl ApiClient {
    pub fn new(api_url: &str, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            translate_url: format!("{}/translate", api_url.trim_end_matches('/')),
        }
    }

    pub fn translate_url(&self) -> &str {
        &self.translate_url
    }

    pub async fn translate(&self, text: &str) -> Result<TranslationResponse, ClientError> {
        debug!("Posting {} chars to {}", text.len(), self.translate_url);

        let response = self
            .http
            .post(&self.translate_url)
            .json(&TranslationRequest {
                text: text.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The body is informative only; the status is what gets reported
            let detail = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.detail);
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<TranslationResponse>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
