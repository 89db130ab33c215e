//! HTTP client implementation

use std::time::Duration;

use http::StatusCode;
use reqwest::{header, Client};
use serde::Serialize;
use tracing::debug;

use crate::errors::{MockError, SinkError};

/// HTTP client for the log store
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client whose requests give up after `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MockError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a PUT request with a JSON body.
    ///
    /// Only `200 OK` and `201 Created` count as success.
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<StatusCode, SinkError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("PUT {}", url);

        let payload = serde_json::to_vec(body)?;
        let response = self
            .client
            .put(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            debug!("HTTP PUT failed: {} - {}", status, body);
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(status)
    }
}
