//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    customers::records::{CustomerRecord, CustomerUuid},
    orders::{
        data::{OrderFilter, OrderOrder},
        records::{OrderRecord, OrderUuid},
    },
    pagination::{PageWindow, contains_pattern},
};

const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("../sql/count_orders.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &OrderFilter,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_ORDERS_SQL)
            .bind(filter.total_amount_gte)
            .bind(filter.total_amount_lte)
            .bind(filter.order_date_gte.map(SqlxTimestamp::from))
            .bind(filter.order_date_lte.map(SqlxTimestamp::from))
            .bind(filter.customer_name_icontains.as_deref().map(contains_pattern))
            .bind(filter.product_name_icontains.as_deref().map(contains_pattern))
            .bind(filter.product_id.map(|uuid| uuid.into_uuid()))
            .fetch_one(&mut **tx)
            .await
    }

    /// Orders come back without their products.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &OrderFilter,
        order: OrderOrder,
        window: PageWindow,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(filter.total_amount_gte)
            .bind(filter.total_amount_lte)
            .bind(filter.order_date_gte.map(SqlxTimestamp::from))
            .bind(filter.order_date_lte.map(SqlxTimestamp::from))
            .bind(filter.customer_name_icontains.as_deref().map(contains_pattern))
            .bind(filter.product_name_icontains.as_deref().map(contains_pattern))
            .bind(filter.product_id.map(|uuid| uuid.into_uuid()))
            .bind(order.as_sql_key())
            .bind(window.sql_limit())
            .bind(window.sql_offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        total_amount: Decimal,
        order_date: Timestamp,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(OrderUuid::new().into_uuid())
            .bind(customer.into_uuid())
            .bind(total_amount)
            .bind(SqlxTimestamp::from(order_date))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let customer = CustomerRecord {
            uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            name: row.try_get("customer_name")?,
            email: row.try_get("customer_email")?,
            phone: row.try_get("customer_phone")?,
            created_at: row
                .try_get::<SqlxTimestamp, _>("customer_created_at")?
                .to_jiff(),
            updated_at: row
                .try_get::<SqlxTimestamp, _>("customer_updated_at")?
                .to_jiff(),
        };

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer,
            products: Vec::new(),
            total_amount: row.try_get::<Decimal, _>("total_amount")?,
            order_date: row.try_get::<SqlxTimestamp, _>("order_date")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
