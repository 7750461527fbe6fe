//! REST API over a loaded traffic history.
//!
//! Provides three GET endpoints:
//! - `/history`: the historical points
//! - `/forecast?days=N`: history followed by an `N`-day forecast
//! - `/summary?days=N`: aggregate metrics for the same series

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::forecast::LinearTrendForecast;
use crate::series::TrafficPoint;

/// Immutable application state shared across all request handlers.
///
/// The history is loaded once; forecasts are recomputed per request, so no
/// locks are needed.
pub struct AppState {
    /// Historical points served by every endpoint.
    pub history: Vec<TrafficPoint>,
    /// Engine used to project the history.
    pub engine: LinearTrendForecast,
    /// Horizon used when a request does not pass `days`.
    pub default_horizon: u32,
    /// Jitter seed; each request draws from OS entropy when unset.
    pub seed: Option<u64>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/history", get(handlers::get_history))
        .route("/forecast", get(handlers::get_forecast))
        .route("/summary", get(handlers::get_summary))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
