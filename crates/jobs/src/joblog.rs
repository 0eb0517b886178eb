//! Append-only job log files.

use std::{
    fs::OpenOptions,
    io::Write as _,
    path::{Path, PathBuf},
};

use jiff::Zoned;

use crate::JobError;

/// Timestamp layout used by every job except the heartbeat.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render `now` in the standard log layout.
#[must_use]
pub fn timestamp(now: &Zoned) -> String {
    now.strftime(LOG_TIMESTAMP_FORMAT).to_string()
}

/// Collapse every run of whitespace, newlines included, into one space.
#[must_use]
pub fn single_line(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Standard failure line, `<ts> - ERROR: <message>`, always one line.
#[must_use]
pub fn error_line(now: &Zoned, error: &JobError) -> String {
    format!(
        "{} - ERROR: {}\n",
        timestamp(now),
        single_line(&error.to_string())
    )
}

/// A log file that only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobLog {
    path: PathBuf,
}

impl JobLog {
    /// A log at `path`. Nothing is opened until the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the log lives.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a pre-formatted block with a single write.
    pub fn append(&self, block: &str) -> Result<(), JobError> {
        if block.is_empty() {
            return Ok(());
        }

        let log_error = |source| JobError::Log {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(log_error)?;

        file.write_all(block.as_bytes()).map_err(log_error)
    }
}
