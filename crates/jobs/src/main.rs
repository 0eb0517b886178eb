//! CRM scheduled jobs runner

use std::process::ExitCode;

use clap::Parser;
use jiff::Zoned;
use tracing_subscriber::{EnvFilter, fmt};

use crm_jobs::{
    JobError,
    client::{GraphqlClient, HttpTransport, RetryPolicy},
    config::JobsConfig,
    joblog::JobLog,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one job. Failures end up in the job's log, never in the exit code.
#[tokio::main]
pub async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    init_tracing();

    let config = JobsConfig::parse();
    let job = config.job();
    let log = JobLog::new(config.log_file());
    let now = Zoned::now();

    let printed = match HttpTransport::new(config.graphql_url.clone(), config.timeout()) {
        Ok(transport) => {
            let client = GraphqlClient::new(transport, RetryPolicy::new(config.retries()));

            job.run(&client, &log, &now).await
        }
        Err(transport_error) => job.fail(&log, &now, &JobError::Http(transport_error)),
    };

    #[expect(
        clippy::print_stdout,
        reason = "job output goes to stdout for the scheduler to capture"
    )]
    {
        print!("{printed}");
    }

    ExitCode::SUCCESS
}
