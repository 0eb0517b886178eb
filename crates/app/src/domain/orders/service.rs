//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::PgCustomersRepository,
        orders::{
            data::{NewOrder, OrderFilter, OrderOrder, checked_total},
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repositories::{PgOrderProductsRepository, PgOrdersRepository},
        },
        pagination::{Page, PageRequest, count_from_sql},
        products::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    order_products_repository: PgOrderProductsRepository,
    customers_repository: PgCustomersRepository,
    products_repository: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            order_products_repository: PgOrderProductsRepository::new(),
            customers_repository: PgCustomersRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    async fn with_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut products = self
            .order_products_repository
            .list_order_products(tx, &uuids)
            .await?;

        for order in &mut orders {
            order.products = products.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(
        &self,
        filter: OrderFilter,
        order: OrderOrder,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let total_count =
            count_from_sql(self.orders_repository.count_orders(&mut tx, &filter).await?);
        let window = page.window(total_count);

        let items = if window.limit == 0 {
            Vec::new()
        } else {
            let orders = self
                .orders_repository
                .list_orders(&mut tx, &filter, order, window)
                .await?;

            self.with_products(&mut tx, orders).await?
        };

        tx.commit().await?;

        Ok(Page {
            items,
            offset: window.offset,
            total_count,
        })
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.orders_repository.get_order(&mut tx, order).await?;
        let mut orders = self.with_products(&mut tx, vec![order]).await?;

        tx.commit().await?;

        orders.pop().ok_or(OrdersServiceError::NotFound)
    }

    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        let Some(customer) = order.customer_uuid() else {
            return Err(OrdersServiceError::CustomerNotFound);
        };

        let product_uuids = order.product_uuids();

        let mut tx = self.db.begin_transaction().await?;

        match self.customers_repository.get_customer(&mut tx, customer).await {
            Ok(_) => {}
            Err(sqlx::Error::RowNotFound) => return Err(OrdersServiceError::CustomerNotFound),
            Err(error) => return Err(error.into()),
        }

        let products = self
            .products_repository
            .get_products(&mut tx, &product_uuids)
            .await?;

        if products.is_empty() {
            return Err(OrdersServiceError::NoValidProducts);
        }

        let total = checked_total(&products)?;
        let order_date = order.order_date.unwrap_or_else(Timestamp::now);

        let mut created = self
            .orders_repository
            .create_order(&mut tx, customer, total, order_date)
            .await?;

        let resolved: Vec<_> = products.iter().map(|product| product.uuid).collect();

        self.order_products_repository
            .attach_products(&mut tx, created.uuid, &resolved)
            .await?;

        tx.commit().await?;

        created.products = products;

        info!(order = %created.uuid, total = %created.total_amount, "order created");

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve one page of orders matching `filter`, products included.
    async fn list_orders(
        &self,
        filter: OrderFilter,
        order: OrderOrder,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Resolve the customer and products, total the prices and persist the
    /// order with its product associations.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;
}
