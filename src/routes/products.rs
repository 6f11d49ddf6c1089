use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::Result,
    models::{NewProduct, Product},
    utils::extractors::JsonBody,
};

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.store.list_products().await?;

    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.store.create_product(payload).await?;

    Ok((StatusCode::CREATED, Json(product)))
}
