//! Retry policy for transient request failures.

use std::time::Duration;

use crate::{JobError, client::TransportErrorKind};

const INITIAL_BACKOFF: Duration = Duration::from_millis(200);
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// How many extra attempts to make and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub retries: u32,

    /// Delay before the first retry.
    pub initial_backoff: Duration,

    /// Upper bound for any single delay.
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Exponential backoff from 200 ms, capped at 5 s.
    #[must_use]
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            initial_backoff: INITIAL_BACKOFF,
            max_backoff: MAX_BACKOFF,
        }
    }

    /// Single attempt, no retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new(0)
    }

    /// Delay before retry number `attempt + 1`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1_u32.checked_shl(attempt).unwrap_or(u32::MAX);

        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Connection failures, timeouts, 429 and 5xx are worth another try.
    #[must_use]
    pub fn should_retry(error: &JobError) -> bool {
        match error {
            JobError::Http(error) => matches!(
                error.kind,
                TransportErrorKind::Connect | TransportErrorKind::Timeout
            ),
            JobError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            JobError::GraphQl(_) | JobError::Decode(_) | JobError::Log { .. } => false,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
