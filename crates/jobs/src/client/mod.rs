//! GraphQL over HTTP client.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::JobError;

mod retry;
mod transport;

pub use retry::RetryPolicy;
pub use transport::{
    GraphqlTransport, HttpReply, HttpTransport, MockGraphqlTransport, TransportError,
    TransportErrorKind,
};

/// Longest slice of an error body quoted in a status error.
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Value>,

    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

/// Executes GraphQL operations against one endpoint, retrying transient
/// failures according to its [`RetryPolicy`].
pub struct GraphqlClient {
    transport: Box<dyn GraphqlTransport>,
    retry: RetryPolicy,
}

impl Debug for GraphqlClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GraphqlClient")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl GraphqlClient {
    /// Client sending through `transport` and retrying per `retry`.
    #[must_use]
    pub fn new(transport: impl GraphqlTransport + 'static, retry: RetryPolicy) -> Self {
        Self {
            transport: Box::new(transport),
            retry,
        }
    }

    /// Run `query` with `variables` and decode the `data` object into `T`.
    pub async fn execute<T>(&self, query: &str, variables: Value) -> Result<T, JobError>
    where
        T: DeserializeOwned,
    {
        let body = json!({ "query": query, "variables": variables });

        let mut attempt = 0;

        let data = loop {
            match self.send_once(&body).await {
                Err(error) if attempt < self.retry.retries && RetryPolicy::should_retry(&error) => {
                    let delay = self.retry.backoff(attempt);

                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis(),
                        "GraphQL request failed, retrying: {error}"
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => break result?,
            }
        };

        Ok(serde_json::from_value(data)?)
    }

    async fn send_once(&self, body: &Value) -> Result<Value, JobError> {
        let reply = self.transport.post(body).await?;

        debug!(status = reply.status, "GraphQL response received");

        if !(200..300).contains(&reply.status) {
            return Err(JobError::Status {
                status: reply.status,
                body: reply.body.trim().chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let envelope: Envelope = serde_json::from_str(&reply.body)?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope
                .errors
                .into_iter()
                .map(|error| error.message)
                .collect();

            return Err(JobError::GraphQl(messages.join("; ")));
        }

        envelope
            .data
            .filter(|data| !data.is_null())
            .ok_or_else(|| JobError::Decode("response has no data".to_owned()))
    }
}
