//! HTTP router configuration

use crate::config::HttpConfig;
use crate::handlers::{analyze_text, analyze_upload, health_check};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use clausewise::ContractAnalyzer;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ContractAnalyzer>,
    pub config: Arc<HttpConfig>,
}

impl AppState {
    pub fn new(analyzer: ContractAnalyzer, config: HttpConfig) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            config: Arc::new(config),
        }
    }
}

/// Create the Axum router with all endpoints and middleware
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_body_size;
    let enable_cors = state.config.enable_cors;

    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/api/analyze", post(analyze_upload))
        .route("/api/analyze/text", post(analyze_text))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

/// Bind and serve until a shutdown signal arrives.
pub async fn serve(state: AppState) -> std::io::Result<()> {
    let addr = state.config.socket_addr();
    tokio::fs::create_dir_all(&state.config.upload_dir).await?;

    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, upload_dir = %state.config.upload_dir.display(), "Clausewise HTTP API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(crate::shutdown::shutdown_signal())
        .await
}
