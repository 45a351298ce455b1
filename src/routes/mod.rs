use std::sync::Arc;

use axum::{routing::get, Router};

use crate::error::AppError;
use crate::AppState;

pub mod health;
pub mod notifications;
pub mod users;

/// All application routes, without state or middleware layers.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Engagement notifications (cooldown-gated)
        .nest("/api/notifications", notifications::router())
        // Per-user listings
        .nest("/api/users", users::router())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}
