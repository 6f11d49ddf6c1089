use axum::{Json, extract::State};
use serde::Serialize;

use crate::{AppState, error::Result};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

/// Liveness: the process is up, regardless of the products database.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        database: None,
    })
}

/// Readiness: products can be served only while the store answers a ping.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<HealthStatus>> {
    state.store.ping().await?;

    Ok(Json(HealthStatus {
        status: "ready",
        database: Some("connected"),
    }))
}
