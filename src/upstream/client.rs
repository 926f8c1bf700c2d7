//! reqwest-backed catalog client.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{UpstreamClient, UpstreamResponse};
use crate::error::UpstreamError;

/// HTTP client for the Ghibli catalog.
#[derive(Debug, Clone)]
pub struct GhibliClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl GhibliClient {
    /// Creates a client rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, UpstreamError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(base_url, http_client))
    }

    pub fn with_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl UpstreamClient for GhibliClient {
    #[instrument(skip(self))]
    async fn get(&self, path: &str) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.url_for(path);
        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            debug!(%status, "upstream returned failure");
            return Ok(UpstreamResponse::Failure { status, body });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(UpstreamResponse::Empty);
        }

        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        if value.is_null() {
            Ok(UpstreamResponse::Empty)
        } else {
            Ok(UpstreamResponse::Document(value))
        }
    }
}
