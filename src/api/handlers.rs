//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::debug;

use super::AppState;
use super::types::{ErrorResponse, HorizonQuery};
use crate::config::ALLOWED_HORIZONS;
use crate::jitter::rng_from_seed;
use crate::series::{TrafficPoint, combine};
use crate::summary::TrafficSummary;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Returns the historical points.
///
/// `GET /history` → 200 + `Vec<TrafficPoint>` JSON
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<TrafficPoint>> {
    Json(state.history.clone())
}

/// Returns history followed by a freshly computed forecast.
///
/// `GET /forecast` → default horizon
/// `GET /forecast?days=60` → 60-day forecast
/// `GET /forecast?days=45` → 400 + `ErrorResponse`
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HorizonQuery>,
) -> Result<Json<Vec<TrafficPoint>>, ApiError> {
    let days = resolve_horizon(&state, &query)?;
    Ok(Json(combined_series(&state, days)))
}

/// Returns summary metrics for history plus forecast.
///
/// `GET /summary?days=N` → 200 + `TrafficSummary` JSON
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HorizonQuery>,
) -> Result<Json<TrafficSummary>, ApiError> {
    let days = resolve_horizon(&state, &query)?;
    let series = combined_series(&state, days);
    Ok(Json(TrafficSummary::from_series(&series)))
}

fn resolve_horizon(state: &AppState, query: &HorizonQuery) -> Result<u32, ApiError> {
    let days = query.days.unwrap_or(state.default_horizon);
    if query.days.is_some() && !ALLOWED_HORIZONS.contains(&days) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`days` must be one of {ALLOWED_HORIZONS:?}, got {days}"),
            }),
        ));
    }
    Ok(days)
}

fn combined_series(state: &AppState, days: u32) -> Vec<TrafficPoint> {
    let mut rng = rng_from_seed(state.seed);
    let forecast = state
        .engine
        .calculate_forecast(&state.history, days, &mut rng);
    debug!(days, produced = forecast.len(), "computed forecast");
    combine(&state.history, &forecast)
}
