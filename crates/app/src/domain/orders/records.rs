//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{customers::records::CustomerRecord, products::records::ProductRecord},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer: CustomerRecord,
    pub products: Vec<ProductRecord>,
    pub total_amount: Decimal,
    pub order_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
