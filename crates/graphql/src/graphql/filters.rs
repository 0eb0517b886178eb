//! Filter and ordering inputs for the list queries.

use async_graphql::{Enum, ID, InputObject};
use rust_decimal::Decimal;

use crm_app::domain::{
    customers::data::{CustomerFilter, CustomerOrder},
    orders::data::{OrderFilter, OrderOrder},
    products::{
        data::{ProductFilter, ProductOrder},
        records::ProductUuid,
    },
};

use crate::graphql::{errors, scalars::DateTime};

#[derive(Debug, Default, InputObject)]
#[graphql(name = "CustomerFilter")]
pub(crate) struct CustomerFilterInput {
    name_icontains: Option<String>,
    email_icontains: Option<String>,
    phone_startswith: Option<String>,
    created_at_gte: Option<DateTime>,
    created_at_lte: Option<DateTime>,
}

impl From<CustomerFilterInput> for CustomerFilter {
    fn from(input: CustomerFilterInput) -> Self {
        Self {
            name_icontains: input.name_icontains,
            email_icontains: input.email_icontains,
            phone_startswith: input.phone_startswith,
            created_at_gte: input.created_at_gte.map(|at| at.0),
            created_at_lte: input.created_at_lte.map(|at| at.0),
        }
    }
}

#[derive(Debug, Default, InputObject)]
#[graphql(name = "ProductFilter")]
pub(crate) struct ProductFilterInput {
    name_icontains: Option<String>,
    price_gte: Option<Decimal>,
    price_lte: Option<Decimal>,
    stock_gte: Option<i32>,
    stock_lte: Option<i32>,

    /// `true` keeps products with fewer than 10 in stock.
    low_stock: Option<bool>,
}

impl From<ProductFilterInput> for ProductFilter {
    fn from(input: ProductFilterInput) -> Self {
        Self {
            name_icontains: input.name_icontains,
            price_gte: input.price_gte,
            price_lte: input.price_lte,
            stock_gte: input.stock_gte,
            stock_lte: input.stock_lte,
            low_stock: input.low_stock,
        }
    }
}

#[derive(Debug, Default, InputObject)]
#[graphql(name = "OrderFilter")]
pub(crate) struct OrderFilterInput {
    total_amount_gte: Option<Decimal>,
    total_amount_lte: Option<Decimal>,
    order_date_gte: Option<DateTime>,
    order_date_lte: Option<DateTime>,
    customer_name_icontains: Option<String>,
    product_name_icontains: Option<String>,
    product_id: Option<ID>,
}

impl TryFrom<OrderFilterInput> for OrderFilter {
    type Error = async_graphql::Error;

    fn try_from(input: OrderFilterInput) -> Result<Self, Self::Error> {
        let product_id = match input.product_id {
            Some(id) => {
                Some(ProductUuid::parse(&id).ok_or_else(|| errors::validation("Invalid product ID"))?)
            }
            None => None,
        };

        Ok(Self {
            total_amount_gte: input.total_amount_gte,
            total_amount_lte: input.total_amount_lte,
            order_date_gte: input.order_date_gte.map(|at| at.0),
            order_date_lte: input.order_date_lte.map(|at| at.0),
            customer_name_icontains: input.customer_name_icontains,
            product_name_icontains: input.product_name_icontains,
            product_id,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "CustomerOrder")]
pub(crate) enum CustomerOrderBy {
    NameAsc,
    NameDesc,
    EmailAsc,
    CreatedAtAsc,
    CreatedAtDesc,
}

impl From<CustomerOrderBy> for CustomerOrder {
    fn from(order: CustomerOrderBy) -> Self {
        match order {
            CustomerOrderBy::NameAsc => Self::NameAsc,
            CustomerOrderBy::NameDesc => Self::NameDesc,
            CustomerOrderBy::EmailAsc => Self::EmailAsc,
            CustomerOrderBy::CreatedAtAsc => Self::CreatedAtAsc,
            CustomerOrderBy::CreatedAtDesc => Self::CreatedAtDesc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "ProductOrder")]
pub(crate) enum ProductOrderBy {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    StockAsc,
    StockDesc,
}

impl From<ProductOrderBy> for ProductOrder {
    fn from(order: ProductOrderBy) -> Self {
        match order {
            ProductOrderBy::NameAsc => Self::NameAsc,
            ProductOrderBy::NameDesc => Self::NameDesc,
            ProductOrderBy::PriceAsc => Self::PriceAsc,
            ProductOrderBy::PriceDesc => Self::PriceDesc,
            ProductOrderBy::StockAsc => Self::StockAsc,
            ProductOrderBy::StockDesc => Self::StockDesc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "OrderOrder")]
pub(crate) enum OrderOrderBy {
    OrderDateAsc,
    OrderDateDesc,
    TotalAmountAsc,
    TotalAmountDesc,
}

impl From<OrderOrderBy> for OrderOrder {
    fn from(order: OrderOrderBy) -> Self {
        match order {
            OrderOrderBy::OrderDateAsc => Self::OrderDateAsc,
            OrderOrderBy::OrderDateDesc => Self::OrderDateDesc,
            OrderOrderBy::TotalAmountAsc => Self::TotalAmountAsc,
            OrderOrderBy::TotalAmountDesc => Self::TotalAmountDesc,
        }
    }
}

/// Resolve the optional filter argument, rejecting malformed ids.
pub(crate) fn order_filter(input: Option<OrderFilterInput>) -> async_graphql::Result<OrderFilter> {
    input.map_or_else(|| Ok(OrderFilter::default()), OrderFilter::try_from)
}
