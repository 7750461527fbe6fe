//! Wires a history source, the forecast engine and the summary together.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, ForecastConfig};
use crate::forecast::LinearTrendForecast;
use crate::generator::SyntheticHistory;
use crate::io::import::{ImportError, load_history_csv};
use crate::jitter::{Jitter, rng_from_seed};
use crate::series::{TrafficPoint, combine};
use crate::summary::TrafficSummary;

/// Errors that stop a forecast run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {}", join_errors(.0))]
    Config(Vec<ConfigError>),
    #[error("failed to load history: {0}")]
    Import(#[from] ImportError),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Where a run's history came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOrigin {
    /// Loaded from a real data file.
    Observed,
    /// Produced by [`SyntheticHistory`] because no data file was configured.
    Synthetic,
}

impl fmt::Display for HistoryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Observed => f.write_str("observed"),
            Self::Synthetic => f.write_str("synthetic"),
        }
    }
}

/// Output of one forecast run.
#[derive(Debug, Clone)]
pub struct ForecastRun {
    pub origin: HistoryOrigin,
    pub history: Vec<TrafficPoint>,
    /// Empty when the history was too short to fit.
    pub forecast: Vec<TrafficPoint>,
}

impl ForecastRun {
    /// History followed by forecast, ready for a chart.
    pub fn combined(&self) -> Vec<TrafficPoint> {
        combine(&self.history, &self.forecast)
    }

    /// Aggregate metrics over the combined series.
    pub fn summary(&self) -> TrafficSummary {
        TrafficSummary::from_series(&self.combined())
    }
}

/// Obtains the run's history: the configured CSV file, or a synthetic series
/// ending on `run.reference_date` (or `today`) when none is configured.
///
/// # Errors
///
/// Returns an `ImportError` if a configured file cannot be loaded.
pub fn load_history(
    cfg: &ForecastConfig,
    today: NaiveDate,
    jitter: &mut impl Jitter,
) -> Result<(Vec<TrafficPoint>, HistoryOrigin), ImportError> {
    if let Some(path) = &cfg.run.history_csv {
        let history = load_history_csv(path)?;
        info!(path = %path.display(), days = history.len(), "loaded observed history");
        return Ok((history, HistoryOrigin::Observed));
    }

    let reference_date = cfg.run.reference_date.unwrap_or(today);
    info!(
        %reference_date,
        lookback_days = cfg.run.lookback_days,
        "no history file configured, generating synthetic history"
    );
    let generator = SyntheticHistory::from(&cfg.generator);
    let history = generator.generate(reference_date, cfg.run.lookback_days, jitter);
    Ok((history, HistoryOrigin::Synthetic))
}

/// Runs a complete forecast: validate, obtain history, project forward.
///
/// # Errors
///
/// Returns a `PipelineError` if the configuration is invalid or the history
/// file cannot be loaded. A history too short to forecast is not an error;
/// the run's `forecast` is simply empty.
pub fn run(cfg: &ForecastConfig, today: NaiveDate) -> Result<ForecastRun, PipelineError> {
    let errors = cfg.validate();
    if !errors.is_empty() {
        return Err(PipelineError::Config(errors));
    }

    let mut rng = rng_from_seed(cfg.run.seed);
    let (history, origin) = load_history(cfg, today, &mut rng)?;

    let engine = LinearTrendForecast::from(&cfg.forecast);
    let forecast = engine.calculate_forecast(&history, cfg.run.horizon_days, &mut rng);

    if history.is_empty() {
        warn!("history is empty, nothing to forecast");
    } else if forecast.is_empty() {
        warn!(
            days = history.len(),
            required = engine.min_history,
            "history too short to forecast"
        );
    } else {
        info!(
            %origin,
            history_days = history.len(),
            horizon_days = forecast.len(),
            "forecast complete"
        );
    }

    Ok(ForecastRun {
        origin,
        history,
        forecast,
    })
}
