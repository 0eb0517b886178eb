//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::errors::ProductsServiceError;

/// Products with stock below this count as low on stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Units added to each low-stock product by a restock.
pub const RESTOCK_INCREMENT: i32 = 10;

/// Decimal places a price column keeps.
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound of a `NUMERIC(10,2)` price.
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

impl NewProduct {
    /// Check price and stock bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidPrice`] for a non-positive price,
    /// [`ProductsServiceError::PricePrecision`] for sub-cent digits,
    /// [`ProductsServiceError::PriceTooLarge`] past the column range and
    /// [`ProductsServiceError::NegativeStock`] for negative stock.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        if self.price <= Decimal::ZERO {
            return Err(ProductsServiceError::InvalidPrice);
        }

        if self.price.normalize().scale() > PRICE_SCALE {
            return Err(ProductsServiceError::PricePrecision);
        }

        if self.price >= PRICE_LIMIT {
            return Err(ProductsServiceError::PriceTooLarge);
        }

        if self.stock < 0 {
            return Err(ProductsServiceError::NegativeStock);
        }

        Ok(())
    }
}

/// Product listing filter. Set fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name_icontains: Option<String>,
    pub price_gte: Option<Decimal>,
    pub price_lte: Option<Decimal>,
    pub stock_gte: Option<i32>,
    pub stock_lte: Option<i32>,

    /// `true` keeps products below [`LOW_STOCK_THRESHOLD`], `false` keeps the rest.
    pub low_stock: Option<bool>,
}

/// Product listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductOrder {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    StockAsc,
    StockDesc,
}

impl ProductOrder {
    pub(crate) fn as_sql_key(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::StockAsc => "stock_asc",
            Self::StockDesc => "stock_desc",
        }
    }
}
