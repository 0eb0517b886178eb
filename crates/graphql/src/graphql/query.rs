//! Query root.

use async_graphql::{Context, ID, Object, Result, connection::query};

use crm_app::{
    context::AppContext,
    domain::{
        customers::{CustomersServiceError, records::CustomerUuid},
        orders::{OrdersServiceError, records::OrderUuid},
        pagination::PageRequest,
        products::{ProductsServiceError, records::ProductUuid},
    },
};

use crate::graphql::{
    connection::{CrmConnection, into_connection, page_request},
    errors::{customers_error, orders_error, products_error},
    filters::{
        CustomerFilterInput, CustomerOrderBy, OrderFilterInput, OrderOrderBy, ProductFilterInput,
        ProductOrderBy, order_filter,
    },
    types::{Customer, Order, Product},
};

#[derive(Debug, Default)]
pub(crate) struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn hello(&self) -> &'static str {
        "Hello, GraphQL!"
    }

    /// Customers matching `filter`, paginated Relay-style.
    async fn all_customers(
        &self,
        ctx: &Context<'_>,
        filter: Option<CustomerFilterInput>,
        order_by: Option<CustomerOrderBy>,
        first: Option<i32>,
        last: Option<i32>,
        after: Option<String>,
        before: Option<String>,
    ) -> Result<CrmConnection<Customer>> {
        let app = ctx.data::<AppContext>()?;
        let filter = filter.map(Into::into).unwrap_or_default();
        let order = order_by.map(Into::into).unwrap_or_default();

        query(after, before, first, last, |after, before, first, last| async move {
            let page = app
                .customers
                .list_customers(filter, order, page_request(after, before, first, last))
                .await
                .map_err(customers_error)?;

            Ok::<_, async_graphql::Error>(into_connection(page, Customer))
        })
        .await
    }

    /// Products matching `filter`, paginated Relay-style.
    async fn all_products(
        &self,
        ctx: &Context<'_>,
        filter: Option<ProductFilterInput>,
        order_by: Option<ProductOrderBy>,
        first: Option<i32>,
        last: Option<i32>,
        after: Option<String>,
        before: Option<String>,
    ) -> Result<CrmConnection<Product>> {
        let app = ctx.data::<AppContext>()?;
        let filter = filter.map(Into::into).unwrap_or_default();
        let order = order_by.map(Into::into).unwrap_or_default();

        query(after, before, first, last, |after, before, first, last| async move {
            let page = app
                .products
                .list_products(filter, order, page_request(after, before, first, last))
                .await
                .map_err(products_error)?;

            Ok::<_, async_graphql::Error>(into_connection(page, Product))
        })
        .await
    }

    /// Orders matching `filter`, paginated Relay-style.
    async fn all_orders(
        &self,
        ctx: &Context<'_>,
        filter: Option<OrderFilterInput>,
        order_by: Option<OrderOrderBy>,
        first: Option<i32>,
        last: Option<i32>,
        after: Option<String>,
        before: Option<String>,
    ) -> Result<CrmConnection<Order>> {
        let app = ctx.data::<AppContext>()?;
        let filter = order_filter(filter)?;
        let order = order_by.map(Into::into).unwrap_or_default();

        query(after, before, first, last, |after, before, first, last| async move {
            let page = app
                .orders
                .list_orders(filter, order, page_request(after, before, first, last))
                .await
                .map_err(orders_error)?;

            Ok::<_, async_graphql::Error>(into_connection(page, Order))
        })
        .await
    }

    /// Every order matching `filter`, without pagination.
    async fn orders(
        &self,
        ctx: &Context<'_>,
        filter: Option<OrderFilterInput>,
        order_by: Option<OrderOrderBy>,
    ) -> Result<Vec<Order>> {
        let app = ctx.data::<AppContext>()?;

        let page = app
            .orders
            .list_orders(
                order_filter(filter)?,
                order_by.map(Into::into).unwrap_or_default(),
                PageRequest::default(),
            )
            .await
            .map_err(orders_error)?;

        Ok(page.items.into_iter().map(Order).collect())
    }

    async fn customer(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Customer>> {
        let Some(uuid) = CustomerUuid::parse(&id) else {
            return Ok(None);
        };

        match ctx.data::<AppContext>()?.customers.get_customer(uuid).await {
            Ok(record) => Ok(Some(Customer(record))),
            Err(CustomersServiceError::NotFound) => Ok(None),
            Err(error) => Err(customers_error(error)),
        }
    }

    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Product>> {
        let Some(uuid) = ProductUuid::parse(&id) else {
            return Ok(None);
        };

        match ctx.data::<AppContext>()?.products.get_product(uuid).await {
            Ok(record) => Ok(Some(Product(record))),
            Err(ProductsServiceError::NotFound) => Ok(None),
            Err(error) => Err(products_error(error)),
        }
    }

    async fn order(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Order>> {
        let Some(uuid) = OrderUuid::parse(&id) else {
            return Ok(None);
        };

        match ctx.data::<AppContext>()?.orders.get_order(uuid).await {
            Ok(record) => Ok(Some(Order(record))),
            Err(OrdersServiceError::NotFound) => Ok(None),
            Err(error) => Err(orders_error(error)),
        }
    }
}
