//! Customers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    customers::{
        data::{CustomerFilter, CustomerOrder, NewCustomer},
        records::{CustomerRecord, CustomerUuid},
    },
    pagination::{PageWindow, contains_pattern, prefix_pattern},
};

const LIST_CUSTOMERS_SQL: &str = include_str!("sql/list_customers.sql");
const COUNT_CUSTOMERS_SQL: &str = include_str!("sql/count_customers.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const CREATE_CUSTOMER_SQL: &str = include_str!("sql/create_customer.sql");
const EXISTING_EMAILS_SQL: &str = include_str!("sql/existing_emails.sql");

/// Filter values in bind order.
struct FilterParams {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    created_at_gte: Option<SqlxTimestamp>,
    created_at_lte: Option<SqlxTimestamp>,
}

impl From<&CustomerFilter> for FilterParams {
    fn from(filter: &CustomerFilter) -> Self {
        Self {
            name: filter.name_icontains.as_deref().map(contains_pattern),
            email: filter.email_icontains.as_deref().map(contains_pattern),
            phone: filter.phone_startswith.as_deref().map(prefix_pattern),
            created_at_gte: filter.created_at_gte.map(SqlxTimestamp::from),
            created_at_lte: filter.created_at_lte.map(SqlxTimestamp::from),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn count_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &CustomerFilter,
    ) -> Result<i64, sqlx::Error> {
        let params = FilterParams::from(filter);

        query_scalar::<Postgres, i64>(COUNT_CUSTOMERS_SQL)
            .bind(params.name)
            .bind(params.email)
            .bind(params.phone)
            .bind(params.created_at_gte)
            .bind(params.created_at_lte)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &CustomerFilter,
        order: CustomerOrder,
        window: PageWindow,
    ) -> Result<Vec<CustomerRecord>, sqlx::Error> {
        let params = FilterParams::from(filter);

        query_as::<Postgres, CustomerRecord>(LIST_CUSTOMERS_SQL)
            .bind(params.name)
            .bind(params.email)
            .bind(params.phone)
            .bind(params.created_at_gte)
            .bind(params.created_at_lte)
            .bind(order.as_sql_key())
            .bind(window.sql_limit())
            .bind(window.sql_offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(GET_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(CREATE_CUSTOMER_SQL)
            .bind(CustomerUuid::new().into_uuid())
            .bind(customer.name)
            .bind(customer.email)
            .bind(customer.phone)
            .fetch_one(&mut **tx)
            .await
    }

    /// The subset of `emails` already held by stored customers.
    pub(crate) async fn existing_emails(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        emails: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        query_scalar::<Postgres, String>(EXISTING_EMAILS_SQL)
            .bind(emails)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CustomerUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
