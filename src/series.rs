//! Daily traffic series data model.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of a traffic series.
///
/// Exactly one of `clicks` / `forecast_clicks` is populated, selected by
/// `is_forecast`. Build points through [`TrafficPoint::historical`] or
/// [`TrafficPoint::forecast`] so that holds.
///
/// Serialized with camelCase keys and explicit `null`s, which lets a chart
/// draw the historical and forecast lines as two separate series:
///
/// ```
/// use chrono::NaiveDate;
/// use traffic_forecast::series::TrafficPoint;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let json = serde_json::to_string(&TrafficPoint::forecast(day, 1234)).unwrap();
/// assert_eq!(
///     json,
///     r#"{"date":"2025-03-01","clicks":null,"forecastClicks":1234,"isForecast":true}"#
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficPoint {
    /// Calendar day (`YYYY-MM-DD` on the wire).
    pub date: NaiveDate,
    /// Observed clicks; `None` on forecast points.
    pub clicks: Option<u32>,
    /// Projected clicks; `None` on historical points.
    #[serde(default)]
    pub forecast_clicks: Option<u32>,
    /// Whether the point came out of the forecast engine.
    #[serde(default)]
    pub is_forecast: bool,
}

impl TrafficPoint {
    /// Creates an observed (or synthesized) historical point.
    pub fn historical(date: NaiveDate, clicks: u32) -> Self {
        Self {
            date,
            clicks: Some(clicks),
            forecast_clicks: None,
            is_forecast: false,
        }
    }

    /// Creates a projected point.
    pub fn forecast(date: NaiveDate, forecast_clicks: u32) -> Self {
        Self {
            date,
            clicks: None,
            forecast_clicks: Some(forecast_clicks),
            is_forecast: true,
        }
    }

    /// Returns whichever count is populated, or 0 for a malformed point.
    pub fn value(&self) -> u32 {
        self.clicks.or(self.forecast_clicks).unwrap_or(0)
    }
}

impl fmt::Display for TrafficPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_forecast { "forecast" } else { "actual" };
        write!(f, "{} {:>8} {:>7}", self.date, kind, self.value())
    }
}

/// Concatenates a history and its forecast into one chart-ready sequence.
///
/// Historical points are re-tagged with `is_forecast = false`, so a history
/// deserialized without the flag still renders on the historical line.
pub fn combine(history: &[TrafficPoint], forecast: &[TrafficPoint]) -> Vec<TrafficPoint> {
    let mut combined = Vec::with_capacity(history.len() + forecast.len());
    combined.extend(history.iter().map(|p| TrafficPoint {
        is_forecast: false,
        ..*p
    }));
    combined.extend_from_slice(forecast);
    combined
}

/// Converts a rounded, floored value into a click count.
pub(crate) fn to_count(value: f64) -> u32 {
    // `as` saturates, and NaN maps to 0.
    value as u32
}
