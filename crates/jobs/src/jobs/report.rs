//! CRM summary report.

use jiff::Zoned;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::{JobError, client::GraphqlClient, joblog::timestamp, jobs::JobOutput};

/// Default log location.
pub const LOG_FILE: &str = "/tmp/crm_report_log.txt";

const QUERY: &str = "query { allCustomers { totalCount } \
    allOrders { totalCount edges { node { totalAmount } } } }";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportData {
    all_customers: Counted,
    all_orders: OrderTotals,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Counted {
    total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderTotals {
    total_count: u64,

    #[serde(default)]
    edges: Vec<OrderEdge>,
}

#[derive(Debug, Deserialize)]
struct OrderEdge {
    node: OrderNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderNode {
    total_amount: Option<Decimal>,
}

impl OrderTotals {
    fn revenue(&self) -> Decimal {
        self.edges
            .iter()
            .filter_map(|edge| edge.node.total_amount)
            .sum()
    }
}

/// Log customer and order counts with the total revenue.
pub async fn run(client: &GraphqlClient, now: &Zoned) -> Result<JobOutput, JobError> {
    let data: ReportData = client.execute(QUERY, json!({})).await?;

    let line = format!(
        "{} - Report: {} customers, {} orders, {} revenue\n",
        timestamp(now),
        data.all_customers.total_count,
        data.all_orders.total_count,
        data.all_orders.revenue().normalize(),
    );

    Ok(JobOutput::echoed(line))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::jobs::test_support::{fixed_now, replying};

    use super::*;

    #[tokio::test]
    async fn sums_order_totals_exactly() -> TestResult {
        let client = replying(
            QUERY,
            |_| true,
            r#"{"data":{
                "allCustomers":{"totalCount":3},
                "allOrders":{"totalCount":3,"edges":[
                    {"node":{"totalAmount":"10.10"}},
                    {"node":{"totalAmount":"15.40"}},
                    {"node":{"totalAmount":null}}]}}}"#,
        );

        let output = run(&client, &fixed_now()?).await?;

        assert_eq!(
            output.log,
            "2024-01-15 10:30:00 - Report: 3 customers, 3 orders, 25.5 revenue\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_system_reports_zero_revenue() -> TestResult {
        let client = replying(
            QUERY,
            |_| true,
            r#"{"data":{"allCustomers":{"totalCount":0},"allOrders":{"totalCount":0,"edges":[]}}}"#,
        );

        let output = run(&client, &fixed_now()?).await?;

        assert_eq!(
            output.log,
            "2024-01-15 10:30:00 - Report: 0 customers, 0 orders, 0 revenue\n"
        );

        Ok(())
    }
}
