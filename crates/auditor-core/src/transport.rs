//! HTTP transport to the auditor backend.

use crate::config::ClientOptions;
use crate::endpoint::Endpoint;
use crate::error::{AuditorError, Result};
use crate::payload::RequestPayload;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, error, warn};

/// Header carrying the API credential.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Moves payloads to the backend and decodes JSON replies.
///
/// Implementations return errors; the fail-soft conversion happens in
/// [`crate::AuditClient::call_endpoint`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `payload` as multipart to `endpoint` and decodes the JSON body.
    async fn post_multipart(&self, endpoint: Endpoint, payload: &RequestPayload) -> Result<Value>;

    /// GETs the backend root and decodes the JSON body.
    async fn get_root(&self) -> Result<Value>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL without a trailing slash (e.g. "http://127.0.0.1:8000").
    base_url: String,
    /// Value for the `X-API-Key` header.
    api_key: String,
    /// HTTP client for making requests.
    client: Client,
}

impl HttpTransport {
    /// Creates a transport from resolved options.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AuditorError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: options.base_url.trim_end_matches('/').to_string(),
            api_key: options.api_key.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Decodes a response body as JSON regardless of status.
    ///
    /// Error statuses are logged but their JSON bodies are still returned,
    /// so the backend's own error envelope reaches the user.
    async fn decode(&self, url: &str, response: Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url = %url, "Backend returned error status");
        }

        response.json::<Value>().await.map_err(|e| {
            error!(error = %e, url = %url, "Failed to decode backend response");
            AuditorError::Decode(format!("Failed to parse response from {}: {}", url, e))
        })
    }

    fn map_send_error(&self, url: &str, e: &reqwest::Error) -> AuditorError {
        error!(error = %e, url = %url, "Failed to reach backend");
        if e.is_connect() {
            AuditorError::Request(format!("Backend not reachable at {}", self.base_url))
        } else if e.is_timeout() {
            AuditorError::Request(format!("Request to {} timed out", url))
        } else {
            AuditorError::Request(format!("Network error: {}", e))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_multipart(&self, endpoint: Endpoint, payload: &RequestPayload) -> Result<Value> {
        let url = endpoint.url(&self.base_url);
        debug!(
            url = %url,
            fields = ?payload.fields().collect::<Vec<_>>(),
            "Posting multipart payload"
        );

        let form = payload.to_form()?;
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, &e))?;

        self.decode(&url, response).await
    }

    async fn get_root(&self) -> Result<Value> {
        let url = format!("{}/", self.base_url);
        debug!(url = %url, "Checking backend health");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, &e))?;

        self.decode(&url, response).await
    }
}
