//! Liveness probe

use axum::{Json, Router, routing::get};
use shared::models::HealthResponse;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "walkin-server";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Walk-in intake server is running".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
