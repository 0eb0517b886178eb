//! HTTP transport for GraphQL requests.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// Raw HTTP response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// Status code.
    pub status: u16,

    /// Body text.
    pub body: String,
}

/// Coarse failure class, used to decide on retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Could not reach the server.
    Connect,

    /// The request exceeded the client timeout.
    Timeout,

    /// Anything else, e.g. a body that failed to stream.
    Other,
}

/// A request that never produced a usable HTTP response.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Failure class.
    pub kind: TransportErrorKind,

    /// Human-readable cause.
    pub message: String,
}

impl TransportError {
    /// Transport error of `kind` with `message`.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };

        Self::new(kind, error.to_string())
    }
}

/// `reqwest` transport posting JSON bodies to a fixed URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    url: String,
    http: Client,
}

impl HttpTransport {
    /// Build a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be initialised.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            http,
        })
    }
}

#[async_trait]
impl GraphqlTransport for HttpTransport {
    async fn post(&self, body: &Value) -> Result<HttpReply, TransportError> {
        let response = self.http.post(&self.url).json(body).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpReply { status, body })
    }
}

#[automock]
#[async_trait]
/// Sends GraphQL request bodies somewhere and returns what came back.
pub trait GraphqlTransport: Send + Sync {
    /// Send one JSON request body and return the raw reply.
    async fn post(&self, body: &Value) -> Result<HttpReply, TransportError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn unreachable_server_is_a_connect_error() -> TestResult {
        let transport = HttpTransport::new("http://127.0.0.1:9/graphql", Duration::from_secs(2))?;

        let result = transport.post(&serde_json::json!({ "query": "{ hello }" })).await;

        assert!(
            matches!(
                result,
                Err(TransportError {
                    kind: TransportErrorKind::Connect | TransportErrorKind::Timeout,
                    ..
                })
            ),
            "expected transport failure, got {result:?}"
        );

        Ok(())
    }
}
