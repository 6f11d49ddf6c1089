use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to fetch products: {0}")]
    ListProducts(#[source] sqlx::Error),
    #[error("failed to create product: {0}")]
    CreateProduct(#[source] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::ListProducts(_)
            | AppError::CreateProduct(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::ListProducts(ref e) => {
                tracing::error!("Failed to fetch products: {:?}", e);
                "Failed to fetch products".to_string()
            }
            AppError::CreateProduct(ref e) => {
                tracing::error!("Failed to create product: {:?}", e);
                "Failed to create product".to_string()
            }
            AppError::Config(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                "Server configuration error".to_string()
            }
            AppError::BadRequest(msg) => msg,
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
