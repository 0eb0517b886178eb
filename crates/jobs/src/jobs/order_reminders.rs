//! Reminders for orders placed during the last week.

use jiff::{ToSpan as _, Zoned};
use serde::Deserialize;
use serde_json::json;

use crate::{
    JobError,
    client::GraphqlClient,
    joblog::{error_line, timestamp},
    jobs::JobOutput,
};

/// Default log location.
pub const LOG_FILE: &str = "/tmp/order_reminders_log.txt";

const QUERY: &str = "query GetRecentOrders($startDate: DateTime!) { \
    orders(filter: { orderDateGte: $startDate }) { id customer { email } } }";

const LOOKBACK_HOURS: i64 = 7 * 24;

#[derive(Debug, Deserialize)]
struct RecentOrders {
    orders: Vec<RecentOrder>,
}

#[derive(Debug, Deserialize)]
struct RecentOrder {
    id: String,
    customer: OrderCustomer,
}

#[derive(Debug, Deserialize)]
struct OrderCustomer {
    email: String,
}

/// Log a reminder for every order placed in the seven days before `now`.
pub async fn run(client: &GraphqlClient, now: &Zoned) -> Result<JobOutput, JobError> {
    let start_date = now.timestamp() - LOOKBACK_HOURS.hours();

    let data: RecentOrders = client
        .execute(QUERY, json!({ "startDate": start_date.to_string() }))
        .await?;

    let ts = timestamp(now);

    let log = data
        .orders
        .iter()
        .map(|order| {
            format!(
                "{ts} - Reminder for Order ID {}, Customer: {}\n",
                order.id, order.customer.email
            )
        })
        .collect();

    Ok(JobOutput {
        log,
        stdout: "Order reminders processed!\n".to_owned(),
    })
}

/// The error goes to the log, stdout only gets a notice.
pub(crate) fn failure(now: &Zoned, job_error: &JobError) -> JobOutput {
    JobOutput {
        log: error_line(now, job_error),
        stdout: "Error occurred during processing.\n".to_owned(),
    }
}
