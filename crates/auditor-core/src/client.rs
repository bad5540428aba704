//! Fail-soft network primitive.

use crate::config::ClientOptions;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::payload::RequestPayload;
use crate::result::EndpointResult;
use crate::transport::{HttpTransport, Transport};
use std::sync::Arc;
use tracing::debug;

/// Issues authenticated endpoint calls and never fails.
#[derive(Clone)]
pub struct AuditClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for AuditClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditClient").finish_non_exhaustive()
    }
}

impl AuditClient {
    /// Creates a client talking HTTP to the configured backend.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(options: &ClientOptions) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(options)?)))
    }

    /// Creates a client over any transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sends `payload` to `endpoint`.
    ///
    /// Transport and decoding failures come back as
    /// [`EndpointResult::Failure`] carrying the error message.
    pub async fn call_endpoint(&self, endpoint: Endpoint, payload: &RequestPayload) -> EndpointResult {
        match self.transport.post_multipart(endpoint, payload).await {
            Ok(value) => {
                debug!(endpoint = %endpoint, "Endpoint call succeeded");
                EndpointResult::Success(value)
            }
            Err(e) => EndpointResult::failure(e.to_string()),
        }
    }

    /// Checks that the backend answers on its root path.
    pub async fn health(&self) -> EndpointResult {
        match self.transport.get_root().await {
            Ok(value) => EndpointResult::Success(value),
            Err(e) => EndpointResult::failure(e.to_string()),
        }
    }
}
