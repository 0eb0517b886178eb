//! Order Data

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    customers::records::CustomerUuid,
    orders::errors::OrdersServiceError,
    products::records::{ProductRecord, ProductUuid},
};

/// Exclusive upper bound of a `NUMERIC(12,2)` order total.
pub const TOTAL_AMOUNT_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// New Order Data
///
/// Identifiers arrive as external strings and are resolved during creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOrder {
    pub customer_id: String,
    pub product_ids: Vec<String>,
    pub order_date: Option<Timestamp>,
}

impl NewOrder {
    #[must_use]
    pub fn customer_uuid(&self) -> Option<CustomerUuid> {
        CustomerUuid::parse(&self.customer_id)
    }

    /// Well-formed product ids in input order, each at most once.
    #[must_use]
    pub fn product_uuids(&self) -> Vec<ProductUuid> {
        let mut uuids: Vec<ProductUuid> = Vec::with_capacity(self.product_ids.len());

        for uuid in self.product_ids.iter().filter_map(|id| ProductUuid::parse(id)) {
            if !uuids.contains(&uuid) {
                uuids.push(uuid);
            }
        }

        uuids
    }
}

/// Exact sum of the products' prices.
#[must_use]
pub fn total_amount(products: &[ProductRecord]) -> Decimal {
    products.iter().map(|product| product.price).sum()
}

/// [`total_amount`], refused when the total column cannot hold it.
pub(crate) fn checked_total(products: &[ProductRecord]) -> Result<Decimal, OrdersServiceError> {
    let total = total_amount(products);

    if total >= TOTAL_AMOUNT_LIMIT {
        return Err(OrdersServiceError::TotalTooLarge);
    }

    Ok(total)
}

/// Order listing filter. Set fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub total_amount_gte: Option<Decimal>,
    pub total_amount_lte: Option<Decimal>,
    pub order_date_gte: Option<Timestamp>,
    pub order_date_lte: Option<Timestamp>,
    pub customer_name_icontains: Option<String>,
    pub product_name_icontains: Option<String>,
    pub product_id: Option<ProductUuid>,
}

/// Order listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderOrder {
    #[default]
    OrderDateAsc,
    OrderDateDesc,
    TotalAmountAsc,
    TotalAmountDesc,
}

impl OrderOrder {
    pub(crate) fn as_sql_key(self) -> &'static str {
        match self {
            Self::OrderDateAsc => "order_date_asc",
            Self::OrderDateDesc => "order_date_desc",
            Self::TotalAmountAsc => "total_amount_asc",
            Self::TotalAmountDesc => "total_amount_desc",
        }
    }
}
