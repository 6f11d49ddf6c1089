use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    database::check_health,
    error::{AppError, Result},
    models::{NewProduct, Product},
    queries::product_queries,
};

/// Data access for products, shared by every request handler.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products in the table's natural order.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Insert a product and return it with its database-assigned id.
    async fn create_product(&self, product: NewProduct) -> Result<Product>;

    /// Liveness check against the backing database.
    async fn ping(&self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        product_queries::get_all(&self.pool)
            .await
            .map_err(AppError::ListProducts)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product> {
        let created = product_queries::create_product(&self.pool, &product)
            .await
            .map_err(AppError::CreateProduct)?;

        tracing::info!(product_id = created.id, "Product created");

        Ok(created)
    }

    async fn ping(&self) -> Result<()> {
        check_health(&self.pool).await
    }
}
