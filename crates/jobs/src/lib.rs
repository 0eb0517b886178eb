//! Scheduled CRM jobs that talk to the GraphQL API and append to log files.

pub mod client;
pub mod config;
mod error;
pub mod joblog;
pub mod jobs;

pub use error::JobError;
