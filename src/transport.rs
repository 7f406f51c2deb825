//! HTTP transport seam.
//!
//! The status client owns no HTTP session of its own: it drives a
//! [`StatusTransport`] injected by the caller, whose lifecycle stays outside
//! the engine. Production code wraps a shared `reqwest::Client` in
//! [`ReqwestTransport`]; tests inject an in-memory fake.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a transport implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the transport's own bound.
    #[error("request timed out")]
    Timeout,

    /// Any other transport-level failure (connect, TLS, decode, ...).
    #[error("transport error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// Status line and body of one backend reply.
///
/// Non-success statuses are data, not errors: the lookup protocol inspects
/// them to drive the validator retry and the not-found mapping.
#[derive(Debug, Clone)]
pub struct TransportReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body, decoded as text.
    pub body: String,
}

/// Minimal HTTP surface the status engine needs.
#[async_trait]
pub trait StatusTransport: Send + Sync {
    /// POSTs a JSON body and returns the reply regardless of status code.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for transport-level failures; HTTP
    /// error statuses are returned as a normal [`TransportReply`].
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &serde_json::Value,
    ) -> Result<TransportReply, TransportError>;

    /// GETs a resource and returns the reply regardless of status code.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for transport-level failures.
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, String)],
    ) -> Result<TransportReply, TransportError>;
}

/// Production transport backed by a `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an already configured client (timeout, user agent).
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &serde_json::Value,
    ) -> Result<TransportReply, TransportError> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportReply { status, body })
    }

    async fn get(
        &self,
        url: &str,
        headers: &[(&str, String)],
    ) -> Result<TransportReply, TransportError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportReply { status, body })
    }
}
