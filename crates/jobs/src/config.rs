//! Job runner configuration

use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};

use crate::jobs::Job;

/// CRM scheduled jobs, one run per invocation
#[derive(Debug, Parser)]
#[command(name = "crm-jobs", about = "CRM scheduled jobs", long_about = None)]
pub struct JobsConfig {
    /// GraphQL endpoint
    #[arg(
        long,
        global = true,
        env = "CRM_GRAPHQL_URL",
        default_value = "http://localhost:8000/graphql"
    )]
    pub graphql_url: String,

    /// Log file to append to instead of the job's default
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "CRM_JOBS_TIMEOUT_SECONDS", default_value_t = 10)]
    pub timeout_seconds: u64,

    /// Extra attempts after a transient failure (defaults per job)
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Job to run.
    #[command(subcommand)]
    pub job: JobCommand,
}

/// Job selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum JobCommand {
    /// Check that the API answers and log a liveness line
    Heartbeat,

    /// Restock products with low stock
    LowStock,

    /// Log reminders for orders from the last seven days
    OrderReminders,

    /// Log customer, order and revenue totals
    Report,
}

impl From<JobCommand> for Job {
    fn from(command: JobCommand) -> Self {
        match command {
            JobCommand::Heartbeat => Self::Heartbeat,
            JobCommand::LowStock => Self::LowStock,
            JobCommand::OrderReminders => Self::OrderReminders,
            JobCommand::Report => Self::Report,
        }
    }
}

impl JobsConfig {
    /// The selected job.
    #[must_use]
    pub fn job(&self) -> Job {
        self.job.into()
    }

    /// `--log-file`, else the job's default log.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.job().default_log_file()))
    }

    /// `--retries`, else the job's default.
    #[must_use]
    pub fn retries(&self) -> u32 {
        self.retries.unwrap_or_else(|| self.job().default_retries())
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
