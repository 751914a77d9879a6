use serde::{Deserialize, Serialize};

/// Every variant renders as the text shown in place of the short link
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortenError {
    #[error("Please enter a URL")]
    InvalidInput,

    #[error("Error: {0}")]
    Rejected(String),

    #[error("Error: Could not shorten URL")]
    Unavailable,
}

#[derive(Clone)]
pub struct ShortenerClient {
    endpoint: String,
    client: reqwest::Client,
}

impl ShortenerClient {
    /// `endpoint` is the full `/shorten` URL
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn shorten(&self, url: &str) -> Result<String, ShortenError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ShortenError::InvalidInput);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ShortenRequest { url })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Shortener request failed: {}", e);
                ShortenError::Unavailable
            })?;

        let status = response.status();
        let body = response.json::<ShortenResponse>().await.map_err(|e| {
            tracing::warn!("Unreadable shortener response ({}): {}", status, e);
            ShortenError::Unavailable
        })?;

        body.into_result(status)
    }
}

#[derive(Serialize)]
struct ShortenRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ShortenResponse {
    short_url: Option<String>,
    error: Option<String>,
}

impl ShortenResponse {
    fn into_result(self, status: reqwest::StatusCode) -> Result<String, ShortenError> {
        if status.is_success() {
            return self.short_url.ok_or(ShortenError::Unavailable);
        }

        Err(ShortenError::Rejected(
            self.error.unwrap_or_else(|| format!("HTTP {status}")),
        ))
    }
}
