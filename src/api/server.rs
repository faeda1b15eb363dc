//! VLU Report API server
//!
//! HTTP REST API using Axum. Clients upload the telemetry workbook as the
//! request body and receive the views as JSON or the report as a PDF.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::config::ReportConfig;

/// Default upload limit for workbooks, in megabytes
pub const DEFAULT_MAX_UPLOAD_MB: usize = 25;

/// API Server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
    pub report: ReportConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            report: ReportConfig::default(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub version: String,
    pub config: Arc<ReportConfig>,
}

impl AppState {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: Arc::new(config),
        }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>, max_upload_mb: usize) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Views and report
        .route("/api/v1/usage", post(handlers::usage))
        .route("/api/v1/volte", post(handlers::volte))
        .route("/api/v1/detail", post(handlers::detail))
        .route("/api/v1/low-traffic", post(handlers::low_traffic))
        .route("/api/v1/locations", post(handlers::locations))
        .route("/api/v1/report", post(handlers::report))
        // State and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_mb * 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vlu_report=info,tower_http=info".into()),
        )
        .init();

    config.report.validate()?;
    let state = Arc::new(AppState::new(config.report.clone()));
    let app = router(state, config.max_upload_mb);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("📡 VLU Report API Server starting on http://{}", addr);
    info!("   Endpoints: /api/v1/usage, /api/v1/volte, /api/v1/detail, /api/v1/low-traffic, /api/v1/locations, /api/v1/report");
    info!(
        "   SDCA: {}, upload limit: {} MB",
        config.report.default_area_code, config.max_upload_mb
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("VLU Report API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
