//! Post-hoc summary metrics over a combined traffic series.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::series::TrafficPoint;

/// Aggregate figures shown next to the traffic chart.
///
/// Computed from the combined historical + forecast sequence. Totals are kept
/// separate so the headline "total clicks" never includes predicted traffic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficSummary {
    /// Sum of observed clicks over historical points.
    pub total_clicks: u64,
    /// Sum of projected clicks over forecast points.
    pub forecast_total_clicks: u64,
    /// Number of historical days.
    pub historical_days: usize,
    /// Number of forecast days.
    pub forecast_days: usize,
    /// Mean observed clicks per historical day.
    pub avg_daily_clicks: f64,
    /// Mean projected clicks per forecast day.
    pub avg_forecast_clicks: f64,
    /// Last observed day.
    pub last_historical_date: Option<NaiveDate>,
    /// Last projected day.
    pub last_forecast_date: Option<NaiveDate>,
}

impl TrafficSummary {
    /// Aggregates a series that may mix historical and forecast points.
    pub fn from_series(points: &[TrafficPoint]) -> Self {
        let mut total_clicks = 0_u64;
        let mut forecast_total = 0_u64;
        let mut historical_days = 0_usize;
        let mut forecast_days = 0_usize;
        let mut last_historical_date = None;
        let mut last_forecast_date = None;

        for p in points {
            if p.is_forecast {
                forecast_total += u64::from(p.forecast_clicks.unwrap_or(0));
                forecast_days += 1;
                last_forecast_date = Some(p.date);
            } else {
                total_clicks += u64::from(p.clicks.unwrap_or(0));
                historical_days += 1;
                last_historical_date = Some(p.date);
            }
        }

        Self {
            total_clicks,
            forecast_total_clicks: forecast_total,
            historical_days,
            forecast_days,
            avg_daily_clicks: mean(total_clicks, historical_days),
            avg_forecast_clicks: mean(forecast_total, forecast_days),
            last_historical_date,
            last_forecast_date,
        }
    }
}

fn mean(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Sums observed clicks across historical points only.
pub fn total_clicks(points: &[TrafficPoint]) -> u64 {
    points
        .iter()
        .filter(|p| !p.is_forecast)
        .map(|p| u64::from(p.clicks.unwrap_or(0)))
        .sum()
}

impl fmt::Display for TrafficSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date_or_dash =
            |d: Option<NaiveDate>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
        writeln!(f, "--- Traffic Summary ---")?;
        writeln!(
            f,
            "Total clicks:          {} over {} days (avg {:.1}/day)",
            self.total_clicks, self.historical_days, self.avg_daily_clicks
        )?;
        writeln!(
            f,
            "Last observed day:     {}",
            date_or_dash(self.last_historical_date)
        )?;
        if self.forecast_days == 0 {
            return write!(f, "Forecast:              unavailable (history too short)");
        }
        writeln!(
            f,
            "Forecast clicks:       {} over {} days (avg {:.1}/day)",
            self.forecast_total_clicks, self.forecast_days, self.avg_forecast_clicks
        )?;
        write!(
            f,
            "Forecast through:      {}",
            date_or_dash(self.last_forecast_date)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::combine;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn sample() -> Vec<TrafficPoint> {
        let history = vec![
            TrafficPoint::historical(day(1), 100),
            TrafficPoint::historical(day(2), 200),
            TrafficPoint::historical(day(3), 300),
        ];
        let forecast = vec![
            TrafficPoint::forecast(day(4), 400),
            TrafficPoint::forecast(day(5), 600),
        ];
        combine(&history, &forecast)
    }

    #[test]
    fn total_ignores_forecast_points() {
        assert_eq!(total_clicks(&sample()), 600);
    }

    #[test]
    fn summary_splits_history_and_forecast() {
        let s = TrafficSummary::from_series(&sample());
        assert_eq!(s.total_clicks, 600);
        assert_eq!(s.forecast_total_clicks, 1000);
        assert_eq!(s.historical_days, 3);
        assert_eq!(s.forecast_days, 2);
        assert_eq!(s.avg_daily_clicks, 200.0);
        assert_eq!(s.avg_forecast_clicks, 500.0);
        assert_eq!(s.last_historical_date, Some(day(3)));
        assert_eq!(s.last_forecast_date, Some(day(5)));
    }

    #[test]
    fn empty_series() {
        let s = TrafficSummary::from_series(&[]);
        assert_eq!(s.total_clicks, 0);
        assert_eq!(s.avg_daily_clicks, 0.0);
        assert_eq!(s.last_historical_date, None);
        assert!(format!("{s}").contains("unavailable"));
    }

    #[test]
    fn display_mentions_forecast_end() {
        let s = TrafficSummary::from_series(&sample());
        let text = format!("{s}");
        assert!(text.contains("Total clicks:          600"));
        assert!(text.contains("2025-04-05"));
    }
}
