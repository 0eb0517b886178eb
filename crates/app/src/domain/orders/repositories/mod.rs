//! Orders Repositories

mod order_products;
mod orders;

pub(crate) use order_products::PgOrderProductsRepository;
pub(crate) use orders::PgOrdersRepository;
