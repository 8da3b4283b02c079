//! HDB Resale Price Estimator
//!
//! Request pipeline, configuration, and the HTTP boundary in front of the
//! schema registry, feature encoder, and price model.

use anyhow::Context;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub mod config;
pub mod pipeline;
mod routes;

pub use config::EstimatorConfig;
pub use pipeline::{Estimate, EstimateError, Estimator, RequestState, StartupError};
pub use routes::estimate::ErrorResponse;

/// Application state shared across handlers.
///
/// Read-only after startup, so handlers share it without a lock.
pub struct AppState {
    /// Schema, encoder, and loaded model
    pub estimator: Estimator,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(estimator: Estimator) -> Self {
        Self {
            estimator,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: String,
    pub schema_version: String,
    pub column_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/schema", get(routes::schema::get_schema))
        .route("/api/v1/estimate", post(routes::estimate::post_estimate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let schema = state.estimator.schema();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: state.estimator.model().name().to_string(),
        schema_version: schema.version().to_string(),
        column_count: schema.column_count(),
    })
}

/// Initialize logging. `RUST_LOG` wins over the configured level.
pub fn init_logging(default_level: &str) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Run the server
pub async fn run_server(addr: &str, estimator: Estimator) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(estimator));
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
