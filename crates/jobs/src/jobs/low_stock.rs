//! Restock products running low.

use jiff::Zoned;
use serde::Deserialize;
use serde_json::json;

use crate::{JobError, client::GraphqlClient, joblog::timestamp, jobs::JobOutput};

/// Default log location.
pub const LOG_FILE: &str = "/tmp/low_stock_updates_log.txt";

const MUTATION: &str = "mutation { updateLowStockProducts { products { name stock } message } }";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestockData {
    update_low_stock_products: RestockPayload,
}

#[derive(Debug, Deserialize)]
struct RestockPayload {
    products: Vec<RestockedProduct>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RestockedProduct {
    name: String,
    stock: i64,
}

/// Restock low-stock products and list what changed.
pub async fn run(client: &GraphqlClient, now: &Zoned) -> Result<JobOutput, JobError> {
    let data: RestockData = client.execute(MUTATION, json!({})).await?;
    let payload = data.update_low_stock_products;

    let ts = timestamp(now);
    let mut block = format!("{ts} - {}\n", payload.message);

    for product in &payload.products {
        block.push_str(&format!(
            "{ts} - Restocked {}: stock {}\n",
            product.name, product.stock
        ));
    }

    Ok(JobOutput::echoed(block))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::jobs::test_support::{fixed_now, replying};

    use super::*;

    #[tokio::test]
    async fn lists_each_restocked_product() -> TestResult {
        let client = replying(
            MUTATION,
            |_| true,
            r#"{"data":{"updateLowStockProducts":{
                "products":[{"name":"Keyboard","stock":12},{"name":"Mouse","stock":15}],
                "message":"Restocked 2 low-stock products"}}}"#,
        );

        let output = run(&client, &fixed_now()?).await?;

        assert_eq!(
            output.log,
            "2024-01-15 10:30:00 - Restocked 2 low-stock products\n\
             2024-01-15 10:30:00 - Restocked Keyboard: stock 12\n\
             2024-01-15 10:30:00 - Restocked Mouse: stock 15\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn nothing_to_restock_logs_the_message_only() -> TestResult {
        let client = replying(
            MUTATION,
            |_| true,
            r#"{"data":{"updateLowStockProducts":{"products":[],"message":"No low-stock products to restock"}}}"#,
        );

        let output = run(&client, &fixed_now()?).await?;

        assert_eq!(
            output.log,
            "2024-01-15 10:30:00 - No low-stock products to restock\n"
        );

        Ok(())
    }
}
