//! Liveness heartbeat.

use jiff::Zoned;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::{JobError, client::GraphqlClient, joblog::single_line, jobs::JobOutput};

/// Default log location.
pub const LOG_FILE: &str = "/tmp/crm_heartbeat_log.txt";

const QUERY: &str = "query { hello }";

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y-%H:%M:%S";

#[derive(Debug, Deserialize)]
struct HelloData {
    hello: Option<String>,
}

fn prefix(now: &Zoned) -> String {
    format!("{} CRM is alive", now.strftime(TIMESTAMP_FORMAT))
}

/// Probe the API. The heartbeat line is written whatever the outcome.
pub async fn run(client: &GraphqlClient, now: &Zoned) -> JobOutput {
    match client.execute::<HelloData>(QUERY, json!({})).await {
        Ok(HelloData { hello: Some(hello) }) if !hello.is_empty() => {
            JobOutput::echoed(format!("{} | GraphQL OK\n", prefix(now)))
        }
        Ok(_) => JobOutput::echoed(format!("{} | GraphQL NO RESPONSE\n", prefix(now))),
        Err(job_error) => {
            warn!("heartbeat query failed: {job_error}");

            failure(now, &job_error)
        }
    }
}

pub(crate) fn failure(now: &Zoned, job_error: &JobError) -> JobOutput {
    JobOutput::echoed(format!(
        "{} | GraphQL ERROR: {}\n",
        prefix(now),
        single_line(&job_error.to_string())
    ))
}
