use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
    pub timestamp: String,
}

/// Liveness plus a `SELECT 1` round-trip to the database.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    if !db_ok {
        tracing::warn!("Health check: database unreachable");
    }

    let response = HealthResponse {
        status: if db_ok { "healthy" } else { "degraded" }.to_string(),
        database: if db_ok { "ok" } else { "unreachable" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
