use async_graphql::{Request, Response, Variables};
use rust_decimal::Decimal;
use salvo::{
    http::StatusCode,
    test::{ResponseExt, TestClient},
};
use serde_json::{Value, json};
use testresult::TestResult;

use crm_app::domain::{
    customers::{
        CustomersServiceError, ValidationError,
        data::{BulkImport, CustomerCandidate, CustomerOrder},
    },
    orders::{OrdersServiceError, data::OrderOrder},
    pagination::Page,
    products::ProductsServiceError,
};

use crate::test_helpers::{Mocks, make_customer, make_order, make_product};

async fn run(mocks: Mocks, query: &str, variables: Value) -> TestResult<Response> {
    let request = Request::new(query).variables(Variables::from_json(variables));

    Ok(mocks.schema().execute(request).await)
}

fn data(response: &Response) -> TestResult<Value> {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );

    Ok(serde_json::to_value(&response.data)?)
}

fn first_error(response: &Response) -> TestResult<(String, Value)> {
    let errors = serde_json::to_value(&response.errors)?;

    let message = errors[0]["message"].as_str().unwrap_or_default().to_owned();
    let code = errors[0]["extensions"]["code"].clone();

    Ok((message, code))
}

#[tokio::test]
async fn hello_greets() -> TestResult {
    let response = run(Mocks::default(), "{ hello }", json!({})).await?;

    assert_eq!(data(&response)?, json!({ "hello": "Hello, GraphQL!" }));

    Ok(())
}

#[tokio::test]
async fn all_customers_passes_arguments_and_builds_connection() -> TestResult {
    let mut mocks = Mocks::default();
    let alice = make_customer("Alice", "alice@example.com");
    let alina = make_customer("Alina", "alina@example.com");

    mocks.customers.checkpoint();
    mocks
        .customers
        .expect_list_customers()
        .once()
        .withf(|filter, order, page| {
            filter.name_icontains.as_deref() == Some("ali")
                && *order == CustomerOrder::NameDesc
                && page.first == Some(2)
                && page.after.is_none()
        })
        .return_once(move |_, _, _| {
            Ok(Page {
                items: vec![alice, alina],
                offset: 0,
                total_count: 5,
            })
        });

    let response = run(
        mocks,
        r#"{
            allCustomers(filter: { nameIcontains: "ali" }, orderBy: NAME_DESC, first: 2) {
                totalCount
                pageInfo { hasNextPage hasPreviousPage }
                edges { node { name email phone } }
            }
        }"#,
        json!({}),
    )
    .await?;

    let data = data(&response)?;
    let connection = &data["allCustomers"];

    assert_eq!(connection["totalCount"], json!(5));
    assert_eq!(connection["pageInfo"]["hasNextPage"], json!(true));
    assert_eq!(connection["pageInfo"]["hasPreviousPage"], json!(false));
    assert_eq!(
        connection["edges"][1]["node"],
        json!({ "name": "Alina", "email": "alina@example.com", "phone": null })
    );

    Ok(())
}

#[tokio::test]
async fn all_orders_exposes_totals_for_reporting() -> TestResult {
    let mut mocks = Mocks::default();
    let order = make_order(
        make_customer("Alice", "alice@example.com"),
        vec![make_product("Ten", 1_000, 3), make_product("Fifteen", 1_550, 3)],
    );

    mocks.orders.checkpoint();
    mocks
        .orders
        .expect_list_orders()
        .once()
        .withf(|_, order, page| *order == OrderOrder::OrderDateAsc && page.first.is_none())
        .return_once(move |_, _, _| {
            Ok(Page {
                items: vec![order],
                offset: 0,
                total_count: 1,
            })
        });

    let response = run(
        mocks,
        "{ allOrders { totalCount edges { node { totalAmount products { name } } } } }",
        json!({}),
    )
    .await?;

    let data = data(&response)?;

    assert_eq!(data["allOrders"]["totalCount"], json!(1));
    assert_eq!(
        data["allOrders"]["edges"][0]["node"]["totalAmount"],
        json!("25.50")
    );

    Ok(())
}

#[tokio::test]
async fn orders_list_applies_date_filter() -> TestResult {
    let mut mocks = Mocks::default();
    let order = make_order(
        make_customer("Alice", "alice@example.com"),
        vec![make_product("Ten", 1_000, 3)],
    );
    let id = order.uuid.to_string();

    mocks.orders.checkpoint();
    mocks
        .orders
        .expect_list_orders()
        .once()
        .withf(|filter, _, page| {
            filter.order_date_gte.map(|at| at.to_string())
                == Some("2024-01-08T00:00:00Z".to_owned())
                && page.first.is_none()
                && page.last.is_none()
        })
        .return_once(move |_, _, _| {
            Ok(Page {
                items: vec![order],
                offset: 0,
                total_count: 1,
            })
        });

    let response = run(
        mocks,
        "query GetRecentOrders($startDate: DateTime!) {
            orders(filter: { orderDateGte: $startDate }) { id customer { email } }
        }",
        json!({ "startDate": "2024-01-08T00:00:00Z" }),
    )
    .await?;

    assert_eq!(
        data(&response)?,
        json!({ "orders": [{ "id": id, "customer": { "email": "alice@example.com" } }] })
    );

    Ok(())
}

#[tokio::test]
async fn malformed_product_id_filter_is_a_validation_error() -> TestResult {
    let response = run(
        Mocks::default(),
        r#"{ orders(filter: { productId: "nope" }) { id } }"#,
        json!({}),
    )
    .await?;

    let (message, code) = first_error(&response)?;

    assert_eq!(message, "Invalid product ID");
    assert_eq!(code, json!("VALIDATION_ERROR"));

    Ok(())
}

#[tokio::test]
async fn single_lookups_return_null_for_unknown_or_malformed_ids() -> TestResult {
    let mut mocks = Mocks::default();

    mocks.products.checkpoint();
    mocks
        .products
        .expect_get_product()
        .once()
        .return_once(|_| Err(ProductsServiceError::NotFound));

    let missing = make_product("Ghost", 100, 1).uuid;

    let response = run(
        mocks,
        "query Lookups($missing: ID!) {
            customer(id: \"not-a-uuid\") { id }
            product(id: $missing) { id }
        }",
        json!({ "missing": missing.to_string() }),
    )
    .await?;

    assert_eq!(
        data(&response)?,
        json!({ "customer": null, "product": null })
    );

    Ok(())
}

#[tokio::test]
async fn create_customer_reports_validator_message() -> TestResult {
    let mut mocks = Mocks::default();

    mocks.customers.checkpoint();
    mocks
        .customers
        .expect_create_customer()
        .once()
        .withf(|candidate| {
            *candidate
                == CustomerCandidate::new("Carol", "carol@example.com", Some("123".into()))
        })
        .return_once(|_| Err(ValidationError::InvalidPhone("123".into()).into()));

    let response = run(
        mocks,
        r#"mutation {
            createCustomer(name: "Carol", email: "carol@example.com", phone: "123") {
                message
            }
        }"#,
        json!({}),
    )
    .await?;

    let (message, code) = first_error(&response)?;

    assert_eq!(message, "Invalid phone: 123");
    assert_eq!(code, json!("VALIDATION_ERROR"));

    Ok(())
}

#[tokio::test]
async fn create_customer_returns_confirmation() -> TestResult {
    let mut mocks = Mocks::default();
    let created = make_customer("Alice", "alice@example.com");

    mocks.customers.checkpoint();
    mocks
        .customers
        .expect_create_customer()
        .once()
        .withf(|candidate| candidate.phone.is_none())
        .return_once(move |_| Ok(created));

    let response = run(
        mocks,
        r#"mutation {
            createCustomer(name: "Alice", email: "alice@example.com") {
                customer { name }
                message
            }
        }"#,
        json!({}),
    )
    .await?;

    assert_eq!(
        data(&response)?,
        json!({
            "createCustomer": {
                "customer": { "name": "Alice" },
                "message": "Customer created successfully",
            }
        })
    );

    Ok(())
}

#[tokio::test]
async fn bulk_create_customers_returns_created_and_errors() -> TestResult {
    let mut mocks = Mocks::default();
    let bob = make_customer("Bob", "bob@example.com");

    mocks.customers.checkpoint();
    mocks
        .customers
        .expect_bulk_create_customers()
        .once()
        .withf(|candidates| {
            *candidates
                == [
                    CustomerCandidate::new("Bob", "bob@example.com", None),
                    CustomerCandidate::default(),
                ]
        })
        .return_once(move |_| {
            Ok(BulkImport {
                created: vec![bob],
                errors: vec!["Name and email are required".to_owned()],
            })
        });

    let response = run(
        mocks,
        "mutation Import($input: [JSON!]!) {
            bulkCreateCustomers(input: $input) { customers { email } errors }
        }",
        json!({ "input": [{ "name": "Bob", "email": "bob@example.com" }, { "name": 7 }] }),
    )
    .await?;

    assert_eq!(
        data(&response)?,
        json!({
            "bulkCreateCustomers": {
                "customers": [{ "email": "bob@example.com" }],
                "errors": ["Name and email are required"],
            }
        })
    );

    Ok(())
}

#[tokio::test]
async fn bulk_create_storage_failure_is_internal() -> TestResult {
    let mut mocks = Mocks::default();

    mocks.customers.checkpoint();
    mocks
        .customers
        .expect_bulk_create_customers()
        .once()
        .return_once(|_| Err(CustomersServiceError::Sql(sqlx::Error::PoolTimedOut)));

    let response = run(
        mocks,
        "mutation { bulkCreateCustomers(input: []) { errors } }",
        json!({}),
    )
    .await?;

    let (message, code) = first_error(&response)?;

    assert_eq!(message, "Internal server error");
    assert_eq!(code, json!("INTERNAL_SERVER_ERROR"));

    Ok(())
}

#[tokio::test]
async fn create_product_defaults_stock_to_zero() -> TestResult {
    let mut mocks = Mocks::default();
    let created = make_product("Cable", 499, 0);

    mocks.products.checkpoint();
    mocks
        .products
        .expect_create_product()
        .once()
        .withf(|product| product.stock == 0 && product.price == Decimal::new(499, 2))
        .return_once(move |_| Ok(created));

    let response = run(
        mocks,
        r#"mutation { createProduct(name: "Cable", price: "4.99") { product { name price stock } } }"#,
        json!({}),
    )
    .await?;

    assert_eq!(
        data(&response)?,
        json!({ "createProduct": { "product": { "name": "Cable", "price": "4.99", "stock": 0 } } })
    );

    Ok(())
}

#[tokio::test]
async fn create_product_rejects_bad_price() -> TestResult {
    let mut mocks = Mocks::default();

    mocks.products.checkpoint();
    mocks
        .products
        .expect_create_product()
        .once()
        .return_once(|_| Err(ProductsServiceError::InvalidPrice));

    let response = run(
        mocks,
        r#"mutation { createProduct(name: "Free", price: "0") { product { id } } }"#,
        json!({}),
    )
    .await?;

    let (message, code) = first_error(&response)?;

    assert_eq!(message, "Price must be positive");
    assert_eq!(code, json!("VALIDATION_ERROR"));

    Ok(())
}

#[tokio::test]
async fn create_order_forwards_ids_and_returns_total() -> TestResult {
    let mut mocks = Mocks::default();
    let customer = make_customer("Alice", "alice@example.com");
    let products = vec![make_product("Ten", 1_000, 3), make_product("Fifteen", 1_550, 3)];
    let customer_id = customer.uuid.to_string();
    let product_ids: Vec<String> = products.iter().map(|p| p.uuid.to_string()).collect();
    let order = make_order(customer, products);

    let expected_customer = customer_id.clone();
    let expected_products = product_ids.clone();

    mocks.orders.checkpoint();
    mocks
        .orders
        .expect_create_order()
        .once()
        .withf(move |new| {
            new.customer_id == expected_customer
                && new.product_ids == expected_products
                && new.order_date.is_none()
        })
        .return_once(move |_| Ok(order));

    let response = run(
        mocks,
        "mutation Place($customer: ID!, $products: [ID!]!) {
            createOrder(customerId: $customer, productIds: $products) {
                order { totalAmount customer { name } products { name } }
            }
        }",
        json!({ "customer": customer_id, "products": product_ids }),
    )
    .await?;

    let data = data(&response)?;
    let order = &data["createOrder"]["order"];

    assert_eq!(order["totalAmount"], json!("25.50"));
    assert_eq!(order["customer"]["name"], json!("Alice"));
    assert_eq!(order["products"].as_array().map(Vec::len), Some(2));

    Ok(())
}

#[tokio::test]
async fn create_order_without_products_is_not_found() -> TestResult {
    let mut mocks = Mocks::default();

    mocks.orders.checkpoint();
    mocks
        .orders
        .expect_create_order()
        .once()
        .return_once(|_| Err(OrdersServiceError::NoValidProducts));

    let response = run(
        mocks,
        r#"mutation { createOrder(customerId: "x", productIds: []) { order { id } } }"#,
        json!({}),
    )
    .await?;

    let (message, code) = first_error(&response)?;

    assert_eq!(message, "No valid products found");
    assert_eq!(code, json!("NOT_FOUND"));

    Ok(())
}

#[tokio::test]
async fn update_low_stock_products_reports_restocked() -> TestResult {
    let mut mocks = Mocks::default();
    let restocked = vec![make_product("Keyboard", 4_950, 12), make_product("Mouse", 1_999, 15)];

    mocks.products.checkpoint();
    mocks
        .products
        .expect_restock_low_stock()
        .once()
        .return_once(move || Ok(restocked));

    let response = run(
        mocks,
        "mutation { updateLowStockProducts { products { name stock } message } }",
        json!({}),
    )
    .await?;

    assert_eq!(
        data(&response)?,
        json!({
            "updateLowStockProducts": {
                "products": [
                    { "name": "Keyboard", "stock": 12 },
                    { "name": "Mouse", "stock": 15 },
                ],
                "message": "Restocked 2 low-stock products",
            }
        })
    );

    Ok(())
}

#[tokio::test]
async fn update_low_stock_products_with_nothing_to_do() -> TestResult {
    let mut mocks = Mocks::default();

    mocks.products.checkpoint();
    mocks
        .products
        .expect_restock_low_stock()
        .once()
        .return_once(|| Ok(Vec::new()));

    let response = run(
        mocks,
        "mutation { updateLowStockProducts { message } }",
        json!({}),
    )
    .await?;

    assert_eq!(
        data(&response)?["updateLowStockProducts"]["message"],
        json!("No low-stock products to restock")
    );

    Ok(())
}

#[tokio::test]
async fn post_graphql_executes_over_http() -> TestResult {
    let body: Value = TestClient::post("http://example.com/graphql")
        .json(&json!({ "query": "{ hello }" }))
        .send(&Mocks::default().service())
        .await
        .take_json()
        .await?;

    assert_eq!(body, json!({ "data": { "hello": "Hello, GraphQL!" } }));

    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let response = TestClient::post("http://example.com/graphql")
        .raw_json("{ not json")
        .send(&Mocks::default().service())
        .await;

    assert_eq!(response.status_code, Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn get_graphql_serves_graphiql() -> TestResult {
    let page = TestClient::get("http://example.com/graphql")
        .send(&Mocks::default().service())
        .await
        .take_string()
        .await?;

    assert!(page.to_lowercase().contains("graphiql"), "expected GraphiQL page");

    Ok(())
}
