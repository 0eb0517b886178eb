//! GraphQL object types and mutation payloads.

use async_graphql::{ID, Object, SimpleObject};
use rust_decimal::Decimal;

use crm_app::domain::{
    customers::records::CustomerRecord, orders::records::OrderRecord,
    products::records::ProductRecord,
};

use crate::graphql::scalars::DateTime;

/// A CRM customer.
#[derive(Debug, Clone)]
pub(crate) struct Customer(pub(crate) CustomerRecord);

#[Object]
impl Customer {
    async fn id(&self) -> ID {
        ID(self.0.uuid.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn phone(&self) -> Option<&str> {
        self.0.phone.as_deref()
    }

    async fn created_at(&self) -> DateTime {
        DateTime(self.0.created_at)
    }
}

/// A product available for ordering.
#[derive(Debug, Clone)]
pub(crate) struct Product(pub(crate) ProductRecord);

#[Object]
impl Product {
    async fn id(&self) -> ID {
        ID(self.0.uuid.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn price(&self) -> Decimal {
        self.0.price
    }

    async fn stock(&self) -> i32 {
        self.0.stock
    }
}

/// An order placed by a customer.
#[derive(Debug, Clone)]
pub(crate) struct Order(pub(crate) OrderRecord);

#[Object]
impl Order {
    async fn id(&self) -> ID {
        ID(self.0.uuid.to_string())
    }

    async fn customer(&self) -> Customer {
        Customer(self.0.customer.clone())
    }

    async fn products(&self) -> Vec<Product> {
        self.0.products.iter().cloned().map(Product).collect()
    }

    /// Sum of the product prices when the order was placed.
    async fn total_amount(&self) -> Decimal {
        self.0.total_amount
    }

    async fn order_date(&self) -> DateTime {
        DateTime(self.0.order_date)
    }
}

#[derive(Debug, SimpleObject)]
pub(crate) struct CreateCustomerPayload {
    pub(crate) customer: Customer,
    pub(crate) message: String,
}

#[derive(Debug, SimpleObject)]
pub(crate) struct BulkCreateCustomersPayload {
    pub(crate) customers: Vec<Customer>,

    /// One message per rejected record, in input order.
    pub(crate) errors: Vec<String>,
}

#[derive(Debug, SimpleObject)]
pub(crate) struct CreateProductPayload {
    pub(crate) product: Product,
}

#[derive(Debug, SimpleObject)]
pub(crate) struct CreateOrderPayload {
    pub(crate) order: Order,
}

#[derive(Debug, SimpleObject)]
pub(crate) struct UpdateLowStockProductsPayload {
    pub(crate) products: Vec<Product>,
    pub(crate) message: String,
}

impl UpdateLowStockProductsPayload {
    pub(crate) fn from_restocked(products: Vec<ProductRecord>) -> Self {
        let message = if products.is_empty() {
            "No low-stock products to restock".to_owned()
        } else {
            format!("Restocked {} low-stock products", products.len())
        };

        Self {
            products: products.into_iter().map(Product).collect(),
            message,
        }
    }
}
