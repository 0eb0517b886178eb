//! Customers

pub mod data;
pub mod errors;
mod import;
pub mod records;
mod repository;
pub mod service;
pub mod validation;

pub(crate) use repository::PgCustomersRepository;

pub use errors::{CustomersServiceError, ValidationError};
pub use service::*;
