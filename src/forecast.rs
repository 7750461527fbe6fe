//! Trailing-window linear trend forecaster.

use tracing::debug;

use crate::config::ForecastEngineConfig;
use crate::jitter::Jitter;
use crate::series::{TrafficPoint, to_count};

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fits a line through `values`, using each value's index as `x`.
    ///
    /// An empty slice fits the zero line; a single value (or any series with
    /// no spread in `x`) fits a flat line through the mean.
    ///
    /// # Examples
    ///
    /// ```
    /// use traffic_forecast::forecast::LinearFit;
    ///
    /// let fit = LinearFit::fit(&[500.0, 503.0, 506.0, 509.0]);
    /// assert!((fit.slope - 3.0).abs() < 1e-9);
    /// assert!((fit.intercept - 500.0).abs() < 1e-9);
    /// ```
    pub fn fit(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                slope: 0.0,
                intercept: 0.0,
            };
        }

        let x_mean = (n - 1) as f64 / 2.0;
        let y_mean = values.iter().sum::<f64>() / n as f64;

        let mut ss_xx = 0.0;
        let mut ss_xy = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            ss_xx += dx * dx;
            ss_xy += dx * (y - y_mean);
        }

        let slope = if ss_xx > 0.0 { ss_xy / ss_xx } else { 0.0 };
        Self {
            slope,
            intercept: y_mean - slope * x_mean,
        }
    }

    /// Evaluates the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Projects a daily series forward along its recent linear trend.
///
/// The engine fits [`LinearFit`] to the last `window` points of the history
/// and extends the line one day at a time, adding uniform jitter of up to
/// `jitter_amplitude` clicks and clamping at `floor`. Histories shorter than
/// `min_history` produce no forecast at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrendForecast {
    /// Minimum history length required to forecast.
    pub min_history: usize,
    /// Number of trailing points used for the fit.
    pub window: usize,
    /// Bound of the uniform noise added to each projected day.
    pub jitter_amplitude: f64,
    /// Minimum emitted click count.
    pub floor: f64,
}

impl Default for LinearTrendForecast {
    fn default() -> Self {
        Self {
            min_history: 30,
            window: 90,
            jitter_amplitude: 50.0,
            floor: 100.0,
        }
    }
}

impl From<&ForecastEngineConfig> for LinearTrendForecast {
    fn from(cfg: &ForecastEngineConfig) -> Self {
        Self {
            min_history: cfg.min_history,
            window: cfg.window,
            jitter_amplitude: cfg.jitter_amplitude,
            floor: cfg.floor,
        }
    }
}

impl LinearTrendForecast {
    /// Fits the trailing window of `history`.
    ///
    /// Returns `None` when the history is shorter than `min_history`.
    pub fn fit_window(&self, history: &[TrafficPoint]) -> Option<LinearFit> {
        if history.len() < self.min_history {
            return None;
        }
        let start = history.len() - self.window.min(history.len());
        let values: Vec<f64> = history[start..]
            .iter()
            .map(|p| f64::from(p.value()))
            .collect();
        Some(LinearFit::fit(&values))
    }

    /// Produces `horizon_days` forecast points continuing `history`.
    ///
    /// # Arguments
    ///
    /// * `history` - Ascending, gap-free daily points
    /// * `horizon_days` - Number of days to project
    /// * `jitter` - Source of the per-day noise
    ///
    /// # Returns
    ///
    /// Forecast points dated on the days immediately following the last
    /// historical day, or an empty vector if the history is too short.
    pub fn calculate_forecast(
        &self,
        history: &[TrafficPoint],
        horizon_days: u32,
        jitter: &mut impl Jitter,
    ) -> Vec<TrafficPoint> {
        let (Some(fit), Some(last)) = (self.fit_window(history), history.last()) else {
            return Vec::new();
        };
        let window_len = self.window.min(history.len());
        debug!(
            slope = fit.slope,
            intercept = fit.intercept,
            window_len,
            horizon_days,
            "fitted trailing window"
        );

        last.date
            .iter_days()
            .skip(1)
            .take(horizon_days as usize)
            .enumerate()
            .map(|(offset, date)| {
                let x = (window_len + offset) as f64;
                let value = fit.predict(x) + jitter.draw(self.jitter_amplitude);
                TrafficPoint::forecast(date, to_count(value.max(self.floor).round()))
            })
            .collect()
    }
}

/// Forecasts with the default engine settings.
pub fn calculate_forecast(
    history: &[TrafficPoint],
    horizon_days: u32,
    jitter: &mut impl Jitter,
) -> Vec<TrafficPoint> {
    LinearTrendForecast::default().calculate_forecast(history, horizon_days, jitter)
}
