#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use product_service::{
    AppError, AppState, ProductStore, Result, app,
    config::{CorsConfig, ServerConfig},
    models::{NewProduct, Product},
};
use serde_json::Value;
use tower::ServiceExt;

/// In-process stand-in for the products table.
#[derive(Default)]
pub struct MemoryProductStore {
    rows: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i32 + 1;
        let created = Product {
            id,
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Behaves like a store whose database has gone away.
pub struct UnreachableStore;

#[async_trait]
impl ProductStore for UnreachableStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Err(AppError::ListProducts(sqlx::Error::PoolTimedOut))
    }

    async fn create_product(&self, _product: NewProduct) -> Result<Product> {
        Err(AppError::CreateProduct(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<()> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

pub fn test_app(store: impl ProductStore + 'static) -> Router {
    let server = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_body_size: 64 * 1024,
    };
    let cors = CorsConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
    };

    app::router(AppState::new(store), &server, &cors).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
