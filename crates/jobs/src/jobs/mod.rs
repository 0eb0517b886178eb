//! The scheduled jobs.
//!
//! Every run writes exactly one block to its log: the job's output on
//! success or a single error line on failure. Runs never fail.

use jiff::Zoned;
use tracing::{error, info};

use crate::{
    JobError,
    client::GraphqlClient,
    joblog::{JobLog, error_line},
};

pub mod heartbeat;
pub mod low_stock;
pub mod order_reminders;
pub mod report;

/// What a run appends to its log and what it prints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOutput {
    /// Block appended to the log file.
    pub log: String,

    /// Text printed to stdout.
    pub stdout: String,
}

impl JobOutput {
    /// Output that is logged and printed verbatim.
    #[must_use]
    pub fn echoed(text: String) -> Self {
        Self {
            stdout: text.clone(),
            log: text,
        }
    }
}

/// One of the scheduled jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// Liveness check against `hello`.
    Heartbeat,

    /// Restock products with low stock.
    LowStock,

    /// Reminders for last week's orders.
    OrderReminders,

    /// Customer, order and revenue totals.
    Report,
}

impl Job {
    /// Command-line name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Heartbeat => "heartbeat",
            Self::LowStock => "low-stock",
            Self::OrderReminders => "order-reminders",
            Self::Report => "report",
        }
    }

    /// Log written when no `--log-file` is given.
    #[must_use]
    pub fn default_log_file(self) -> &'static str {
        match self {
            Self::Heartbeat => heartbeat::LOG_FILE,
            Self::LowStock => low_stock::LOG_FILE,
            Self::OrderReminders => order_reminders::LOG_FILE,
            Self::Report => report::LOG_FILE,
        }
    }

    /// Retries used when no `--retries` is given.
    #[must_use]
    pub fn default_retries(self) -> u32 {
        match self {
            Self::Heartbeat => 2,
            Self::LowStock | Self::OrderReminders | Self::Report => 3,
        }
    }

    /// Run the job once and record the outcome in `log`.
    ///
    /// Returns the text to print.
    pub async fn run(self, client: &GraphqlClient, log: &JobLog, now: &Zoned) -> String {
        let output = match self {
            Self::Heartbeat => Ok(heartbeat::run(client, now).await),
            Self::LowStock => low_stock::run(client, now).await,
            Self::OrderReminders => order_reminders::run(client, now).await,
            Self::Report => report::run(client, now).await,
        };

        match output {
            Ok(output) => {
                info!(job = self.name(), "job finished");

                self.record(log, output)
            }
            Err(job_error) => self.fail(log, now, &job_error),
        }
    }

    /// Record a failure that happened before or during the run.
    pub fn fail(self, log: &JobLog, now: &Zoned, job_error: &JobError) -> String {
        error!(job = self.name(), "job failed: {job_error}");

        let output = match self {
            Self::Heartbeat => heartbeat::failure(now, job_error),
            Self::OrderReminders => order_reminders::failure(now, job_error),
            Self::LowStock | Self::Report => JobOutput::echoed(error_line(now, job_error)),
        };

        self.record(log, output)
    }

    fn record(self, log: &JobLog, output: JobOutput) -> String {
        if let Err(log_error) = log.append(&output.log) {
            error!(job = self.name(), "{log_error}");
        }

        output.stdout
    }
}
