//! Order Products Repository

use std::collections::HashMap;

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    orders::records::OrderUuid,
    products::records::{ProductRecord, ProductUuid},
};

const CREATE_ORDER_PRODUCTS_SQL: &str = include_str!("../sql/create_order_products.sql");
const LIST_ORDER_PRODUCTS_SQL: &str = include_str!("../sql/list_order_products.sql");

/// A product row tagged with the order it belongs to.
struct OrderProductRow {
    order: OrderUuid,
    product: ProductRecord,
}

impl<'r> FromRow<'r, PgRow> for OrderProductRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product: ProductRecord::from_row(row)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderProductsRepository;

impl PgOrderProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn attach_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        products: &[ProductUuid],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|uuid| uuid.into_uuid()).collect();

        let rows_affected = query(CREATE_ORDER_PRODUCTS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Products of each given order, keyed by order.
    pub(crate) async fn list_order_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<HashMap<OrderUuid, Vec<ProductRecord>>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(HashMap::new());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|uuid| uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, OrderProductRow>(LIST_ORDER_PRODUCTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut products: HashMap<OrderUuid, Vec<ProductRecord>> = HashMap::new();

        for row in rows {
            products.entry(row.order).or_default().push(row.product);
        }

        Ok(products)
    }
}
