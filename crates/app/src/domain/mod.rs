//! CRM Domain Concerns

pub mod customers;
pub mod orders;
pub mod pagination;
pub mod products;
