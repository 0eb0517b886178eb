use std::path::PathBuf;

use clap::Args;
use crm_app::domain::customers::{
    CustomersService, PgCustomersService, data::CustomerCandidate,
};
use serde_json::Value;

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ImportCustomersArgs {
    /// JSON file holding an array of `{name, email, phone}` objects
    file: PathBuf,

    #[command(flatten)]
    database: DatabaseArgs,
}

/// Turn a JSON array document into candidate records.
fn parse_candidates(document: &str) -> Result<Vec<CustomerCandidate>, String> {
    match serde_json::from_str::<Value>(document) {
        Ok(Value::Array(records)) => Ok(records.into_iter().map(CustomerCandidate::from).collect()),
        Ok(_) => Err("expected a JSON array of customer records".to_owned()),
        Err(error) => Err(format!("invalid JSON: {error}")),
    }
}

pub(crate) async fn run(args: ImportCustomersArgs) -> Result<(), String> {
    let document = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let candidates = parse_candidates(&document)?;

    let db = args.database.connect().await?;

    let outcome = PgCustomersService::new(db)
        .bulk_create_customers(candidates)
        .await
        .map_err(|error| format!("import failed: {error}"))?;

    for customer in &outcome.created {
        println!("created: {} {}", customer.uuid, customer.email);
    }

    for error in &outcome.errors {
        println!("error: {error}");
    }

    println!(
        "{} created, {} rejected",
        outcome.created.len(),
        outcome.errors.len()
    );

    Ok(())
}
