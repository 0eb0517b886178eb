//! Mutation root.

use async_graphql::{Context, ID, Json, Object, Result};
use rust_decimal::Decimal;
use serde_json::Value;

use crm_app::{
    context::AppContext,
    domain::{
        customers::data::CustomerCandidate, orders::data::NewOrder, products::data::NewProduct,
    },
};

use crate::graphql::{
    errors::{customers_error, orders_error, products_error},
    scalars::DateTime,
    types::{
        BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload,
        CreateProductPayload, Customer, Order, Product, UpdateLowStockProductsPayload,
    },
};

#[derive(Debug, Default)]
pub(crate) struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<CreateCustomerPayload> {
        let customer = ctx
            .data::<AppContext>()?
            .customers
            .create_customer(CustomerCandidate::new(name, email, phone))
            .await
            .map_err(customers_error)?;

        Ok(CreateCustomerPayload {
            customer: Customer(customer),
            message: "Customer created successfully".to_owned(),
        })
    }

    /// Import many customers at once. Invalid records are reported in
    /// `errors` without stopping the rest of the batch.
    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        input: Vec<Json<Value>>,
    ) -> Result<BulkCreateCustomersPayload> {
        let candidates = input
            .into_iter()
            .map(|Json(record)| CustomerCandidate::from(record))
            .collect();

        let outcome = ctx
            .data::<AppContext>()?
            .customers
            .bulk_create_customers(candidates)
            .await
            .map_err(customers_error)?;

        Ok(BulkCreateCustomersPayload {
            customers: outcome.created.into_iter().map(Customer).collect(),
            errors: outcome.errors,
        })
    }

    async fn create_product(
        &self,
        ctx: &Context<'_>,
        name: String,
        price: Decimal,
        #[graphql(default = 0)] stock: i32,
    ) -> Result<CreateProductPayload> {
        let product = ctx
            .data::<AppContext>()?
            .products
            .create_product(NewProduct { name, price, stock })
            .await
            .map_err(products_error)?;

        Ok(CreateProductPayload {
            product: Product(product),
        })
    }

    /// Place an order. The total is computed from the resolved products.
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        customer_id: ID,
        product_ids: Vec<ID>,
        order_date: Option<DateTime>,
    ) -> Result<CreateOrderPayload> {
        let order = ctx
            .data::<AppContext>()?
            .orders
            .create_order(NewOrder {
                customer_id: customer_id.0,
                product_ids: product_ids.into_iter().map(|id| id.0).collect(),
                order_date: order_date.map(|at| at.0),
            })
            .await
            .map_err(orders_error)?;

        Ok(CreateOrderPayload {
            order: Order(order),
        })
    }

    /// Add 10 units to every product with fewer than 10 in stock.
    async fn update_low_stock_products(
        &self,
        ctx: &Context<'_>,
    ) -> Result<UpdateLowStockProductsPayload> {
        let restocked = ctx
            .data::<AppContext>()?
            .products
            .restock_low_stock()
            .await
            .map_err(products_error)?;

        Ok(UpdateLowStockProductsPayload::from_restocked(restocked))
    }
}
