//! Test helpers.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::Service;

use crm_app::{
    context::AppContext,
    domain::{
        customers::{
            MockCustomersService,
            records::{CustomerRecord, CustomerUuid},
        },
        orders::{
            MockOrdersService,
            records::{OrderRecord, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
    },
};

use crate::{
    config::graphql::GraphqlConfig,
    graphql::{CrmSchema, build_schema},
    observability::RequestLogging,
    router::app_router,
    state::State,
};

/// Service mocks that fail the test on any call nobody expected.
pub(crate) struct Mocks {
    pub(crate) customers: MockCustomersService,
    pub(crate) products: MockProductsService,
    pub(crate) orders: MockOrdersService,
}

impl Default for Mocks {
    fn default() -> Self {
        let mut customers = MockCustomersService::new();

        customers.expect_list_customers().never();
        customers.expect_get_customer().never();
        customers.expect_create_customer().never();
        customers.expect_bulk_create_customers().never();

        let mut products = MockProductsService::new();

        products.expect_list_products().never();
        products.expect_get_product().never();
        products.expect_create_product().never();
        products.expect_restock_low_stock().never();

        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();
        orders.expect_get_order().never();
        orders.expect_create_order().never();

        Self {
            customers,
            products,
            orders,
        }
    }
}

impl Mocks {
    pub(crate) fn into_app(self) -> AppContext {
        AppContext {
            customers: Arc::new(self.customers),
            products: Arc::new(self.products),
            orders: Arc::new(self.orders),
        }
    }

    pub(crate) fn schema(self) -> CrmSchema {
        build_schema(
            self.into_app(),
            &GraphqlConfig {
                depth_limit: 10,
                complexity_limit: 500,
            },
        )
    }

    pub(crate) fn service(self) -> Service {
        Service::new(app_router(
            State::new(self.schema()),
            RequestLogging::new(Duration::from_secs(1), false),
        ))
    }
}

pub(crate) fn make_customer(name: &str, email: &str) -> CustomerRecord {
    CustomerRecord {
        uuid: CustomerUuid::new(),
        name: name.to_owned(),
        email: email.to_owned(),
        phone: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(name: &str, cents: i64, stock: i32) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        name: name.to_owned(),
        price: Decimal::new(cents, 2),
        stock,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(customer: CustomerRecord, products: Vec<ProductRecord>) -> OrderRecord {
    OrderRecord {
        uuid: OrderUuid::new(),
        customer,
        total_amount: products.iter().map(|product| product.price).sum(),
        products,
        order_date: Timestamp::UNIX_EPOCH,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
