use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{config::DatabaseConfig, error::Result};

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = config.connect_options()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    check_health(&pool).await?;

    tracing::info!(
        "Database connection established with {} max connections",
        config.max_connections
    );

    Ok(pool)
}

pub async fn check_health(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").fetch_one(pool).await?;
    Ok(())
}
