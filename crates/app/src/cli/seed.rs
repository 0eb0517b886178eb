use clap::Args;
use crm_app::domain::{
    customers::{CustomersService, PgCustomersService, data::CustomerCandidate},
    orders::{OrdersService, PgOrdersService, data::NewOrder},
    products::{PgProductsService, ProductsService, data::NewProduct},
};
use rust_decimal::Decimal;
use tracing::info;

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

fn sample_customers() -> Vec<CustomerCandidate> {
    vec![
        CustomerCandidate::new("Alice Johnson", "alice@example.com", Some("+12345678901".into())),
        CustomerCandidate::new("Bob Smith", "bob@example.com", Some("123-456-7890".into())),
        CustomerCandidate::new("Carol White", "carol@example.com", None),
    ]
}

fn sample_products() -> Vec<NewProduct> {
    [
        ("Laptop", Decimal::new(99_999, 2), 10),
        ("Mouse", Decimal::new(1_999, 2), 5),
        ("Keyboard", Decimal::new(4_950, 2), 2),
        ("Monitor", Decimal::new(24_900, 2), 25),
    ]
    .into_iter()
    .map(|(name, price, stock)| NewProduct {
        name: name.to_owned(),
        price,
        stock,
    })
    .collect()
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let customers = PgCustomersService::new(db.clone());
    let products = PgProductsService::new(db.clone());
    let orders = PgOrdersService::new(db);

    let imported = customers
        .bulk_create_customers(sample_customers())
        .await
        .map_err(|error| format!("failed to seed customers: {error}"))?;

    for error in &imported.errors {
        println!("skipped customer: {error}");
    }

    let mut created_products = Vec::new();

    for product in sample_products() {
        let created = products
            .create_product(product)
            .await
            .map_err(|error| format!("failed to seed products: {error}"))?;

        created_products.push(created);
    }

    if let Some(customer) = imported.created.first() {
        let order = orders
            .create_order(NewOrder {
                customer_id: customer.uuid.to_string(),
                product_ids: created_products
                    .iter()
                    .take(2)
                    .map(|product| product.uuid.to_string())
                    .collect(),
                order_date: None,
            })
            .await
            .map_err(|error| format!("failed to seed order: {error}"))?;

        println!("order {} total {}", order.uuid, order.total_amount);
    }

    info!(
        customers = imported.created.len(),
        products = created_products.len(),
        "seed data inserted"
    );

    println!(
        "seeded {} customers and {} products",
        imported.created.len(),
        created_products.len()
    );

    Ok(())
}
