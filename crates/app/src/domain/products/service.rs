//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        pagination::{Page, PageRequest, count_from_sql},
        products::{
            data::{LOW_STOCK_THRESHOLD, NewProduct, ProductFilter, ProductOrder, RESTOCK_INCREMENT},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        order: ProductOrder,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let total_count = count_from_sql(self.repository.count_products(&mut tx, &filter).await?);
        let window = page.window(total_count);

        let items = if window.limit == 0 {
            Vec::new()
        } else {
            self.repository
                .list_products(&mut tx, &filter, order, window)
                .await?
        };

        tx.commit().await?;

        Ok(Page {
            items,
            offset: window.offset,
            total_count,
        })
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        info!(product = %created.uuid, "product created");

        Ok(created)
    }

    async fn restock_low_stock(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let restocked = self
            .repository
            .restock_products(&mut tx, LOW_STOCK_THRESHOLD, RESTOCK_INCREMENT)
            .await?;

        tx.commit().await?;

        info!(count = restocked.len(), "low-stock products restocked");

        Ok(restocked)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve one page of products matching `filter`.
    async fn list_products(
        &self,
        filter: ProductFilter,
        order: ProductOrder,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product after checking price and stock.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Adds a fixed increment to every product below the low-stock threshold
    /// and returns the updated products.
    async fn restock_low_stock(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_product(name: &str, cents: i64, stock: i32) -> NewProduct {
        NewProduct {
            name: name.into(),
            price: Decimal::new(cents, 2),
            stock,
        }
    }

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product("Laptop", 99_999, 10))
            .await?;

        assert_eq!(product.name, "Laptop");
        assert_eq!(product.price, Decimal::new(99_999, 2));
        assert_eq!(product.stock, 10);

        let fetched = ctx.products.get_product(product.uuid).await?;

        assert_eq!(fetched, product);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_non_positive_price() {
        let ctx = TestContext::new().await;

        let result = ctx.products.create_product(new_product("Free", 0, 1)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidPrice)),
            "expected InvalidPrice, got {result:?}"
        );
    }

    #[tokio::test]
    async fn sub_cent_price_is_refused_before_storage() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(NewProduct {
                name: "Sticker".into(),
                price: Decimal::new(1, 3),
                stock: 1,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::PricePrecision)),
            "expected PricePrecision, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn restock_only_touches_low_stock_products() -> TestResult {
        let ctx = TestContext::new().await;

        let low = ctx.products.create_product(new_product("Mouse", 1_999, 3)).await?;
        let edge = ctx.products.create_product(new_product("Cable", 499, 9)).await?;
        let fine = ctx.products.create_product(new_product("Desk", 25_000, 10)).await?;

        let restocked = ctx.products.restock_low_stock().await?;

        let stocks: Vec<(&str, i32)> = restocked
            .iter()
            .map(|p| (p.name.as_str(), p.stock))
            .collect();

        assert_eq!(stocks, vec![("Cable", 19), ("Mouse", 13)]);
        assert_eq!(ctx.products.get_product(low.uuid).await?.stock, 13);
        assert_eq!(ctx.products.get_product(edge.uuid).await?.stock, 19);
        assert_eq!(ctx.products.get_product(fine.uuid).await?.stock, 10);

        Ok(())
    }

    #[tokio::test]
    async fn restock_with_nothing_low_returns_empty() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.create_product(new_product("Desk", 25_000, 50)).await?;

        assert!(ctx.products.restock_low_stock().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_low_stock_and_price() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.create_product(new_product("Mouse", 1_999, 3)).await?;
        ctx.products.create_product(new_product("Cable", 499, 9)).await?;
        ctx.products.create_product(new_product("Desk", 25_000, 10)).await?;

        let page = ctx
            .products
            .list_products(
                ProductFilter {
                    low_stock: Some(true),
                    price_gte: Some(Decimal::TEN),
                    ..ProductFilter::default()
                },
                ProductOrder::PriceDesc,
                PageRequest::default(),
            )
            .await?;

        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Mouse"]);
        assert_eq!(page.total_count, 1);

        Ok(())
    }
}
