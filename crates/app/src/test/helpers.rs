//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        customers::{
            CustomersService, CustomersServiceError,
            data::CustomerCandidate,
            records::CustomerRecord,
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::ProductRecord,
        },
    },
    test::TestContext,
};

pub(crate) async fn create_customer(
    ctx: &TestContext,
    name: &str,
    email: &str,
) -> Result<CustomerRecord, CustomersServiceError> {
    ctx.customers
        .create_customer(CustomerCandidate::new(name, email, None))
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
    stock: i32,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            name: name.to_owned(),
            price,
            stock,
        })
        .await
}
