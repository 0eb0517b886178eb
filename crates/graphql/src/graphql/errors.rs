//! Mapping service errors onto coded GraphQL errors.

use async_graphql::{Error, ErrorExtensions as _};
use tracing::error;

use crm_app::domain::{
    customers::CustomersServiceError, orders::OrdersServiceError,
    products::ProductsServiceError,
};

pub(crate) const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub(crate) const NOT_FOUND: &str = "NOT_FOUND";
pub(crate) const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

fn coded(message: impl Into<String>, code: &'static str) -> Error {
    Error::new(message).extend_with(|_, extensions| extensions.set("code", code))
}

pub(crate) fn validation(message: impl Into<String>) -> Error {
    coded(message, VALIDATION_ERROR)
}

pub(crate) fn not_found(message: impl Into<String>) -> Error {
    coded(message, NOT_FOUND)
}

fn internal(source: &dyn std::error::Error) -> Error {
    error!("storage failure while resolving request: {source}");

    coded("Internal server error", INTERNAL_SERVER_ERROR)
}

pub(crate) fn customers_error(error: CustomersServiceError) -> Error {
    match error {
        CustomersServiceError::Validation(source) => validation(source.to_string()),
        CustomersServiceError::AlreadyExists => validation("Customer already exists"),
        CustomersServiceError::InvalidData => validation("Invalid customer data"),
        CustomersServiceError::NotFound => not_found("Customer not found"),
        CustomersServiceError::Sql(ref source) => internal(source),
    }
}

pub(crate) fn products_error(error: ProductsServiceError) -> Error {
    match error {
        ProductsServiceError::NotFound => not_found("Product not found"),
        ProductsServiceError::Sql(ref source) => internal(source),
        ProductsServiceError::AlreadyExists => validation("Product already exists"),
        ProductsServiceError::InvalidPrice
        | ProductsServiceError::PricePrecision
        | ProductsServiceError::PriceTooLarge
        | ProductsServiceError::NegativeStock
        | ProductsServiceError::InvalidData => validation(error.to_string()),
    }
}

pub(crate) fn orders_error(error: OrdersServiceError) -> Error {
    match error {
        OrdersServiceError::CustomerNotFound | OrdersServiceError::NoValidProducts => {
            not_found(error.to_string())
        }
        OrdersServiceError::NotFound => not_found("Order not found"),
        OrdersServiceError::InvalidReference => not_found("Referenced record not found"),
        OrdersServiceError::TotalTooLarge => validation(error.to_string()),
        OrdersServiceError::InvalidData => validation("Invalid order data"),
        OrdersServiceError::Sql(ref source) => internal(source),
    }
}
