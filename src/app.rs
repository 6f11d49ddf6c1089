use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::{AppConfig, CorsConfig, ServerConfig},
    database::{self, PgProductStore, ProductStore},
    error::{AppError, Result},
    routes,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: impl ProductStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Connects to the database and assembles the full application router.
pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;
    let state = AppState::new(PgProductStore::new(pool));

    router(state, &config.server, &config.cors)
}

pub fn router(state: AppState, server: &ServerConfig, cors: &CorsConfig) -> Result<Router> {
    let allowed_origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::Config(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(allowed_origins);

    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(server.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
