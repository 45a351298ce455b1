use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use http::HeaderValue;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod middleware;
mod pagination;
mod routes;
mod services;

use config::Config;
use services::init;

pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedverse_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Feedverse API");
    tracing::info!(
        "Notification cooldown: {} minutes, page size {} (max {})",
        config.notifications.cooldown_minutes,
        config.pagination.default_limit,
        config.pagination.max_limit
    );

    // Initialize database
    let pool = init::init_db(&config).await?;

    let app_state = Arc::new(AppState {
        db: pool,
        config: config.clone(),
    });

    let frontend_origin = config
        .server
        .frontend_url
        .parse::<HeaderValue>()
        .context("Invalid FRONTEND_URL for CORS")?;

    let app = routes::api_router()
        // Add shared state
        .with_state(app_state.clone())
        // Security headers
        .layer(axum::middleware::from_fn(middleware::csp::csp_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(frontend_origin)
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
                .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT]),
        );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    app_state.db.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to bind SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
