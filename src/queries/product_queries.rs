use sqlx::PgPool;

use crate::models::{NewProduct, Product};

pub async fn get_all(pool: &PgPool) -> sqlx::Result<Vec<Product>> {
    sqlx::query_as::<_, Product>("SELECT id, name, description, price, image_url FROM products")
        .fetch_all(pool)
        .await
}

pub async fn create_product(pool: &PgPool, req: &NewProduct) -> sqlx::Result<Product> {
    sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, price, image_url)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, description, price, image_url",
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(&req.image_url)
    .fetch_one(pool)
    .await
}
