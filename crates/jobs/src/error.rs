//! Job errors.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::client::TransportError;

/// Why a job run failed.
#[derive(Debug, Error)]
pub enum JobError {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Http(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },

    /// The response carried a GraphQL `errors` array.
    #[error("{0}")]
    GraphQl(String),

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The log file could not be appended to.
    #[error("could not write {}: {source}", path.display())]
    Log {
        /// Log file that failed.
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<serde_json::Error> for JobError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
