//! Synthetic daily click history used when no live data is available.

use chrono::{Datelike, Days, NaiveDate};
use tracing::warn;

use crate::config::GeneratorConfig;
use crate::jitter::Jitter;
use crate::series::{TrafficPoint, to_count};

/// Number of days before the reference date covered by default.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 480;

/// Longest lookback the generator will cover, roughly one hundred years.
pub const MAX_LOOKBACK_DAYS: u32 = 36_525;

/// Generator for a plausible daily click series.
///
/// Each day's value is composed of:
/// - a base level that drifts upward by `daily_drift` per generated day
/// - a "seasonal" term `seasonal_amplitude * sin(2π * weekday / 365)`
/// - uniform noise in `[-noise_amplitude, noise_amplitude]`
/// - a `weekend_penalty` subtracted on Saturdays and Sundays
///
/// and is rounded and clamped to at least `floor`.
///
/// The seasonal term feeds the weekday index (0 = Sunday) into an annual
/// period, so it behaves as a small fixed weekday offset rather than a yearly
/// cycle. Dashboards built on this series expect that shape.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rand::{SeedableRng, rngs::StdRng};
/// use traffic_forecast::generator::SyntheticHistory;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let history = SyntheticHistory::default().generate(today, 14, &mut rng);
///
/// assert_eq!(history.len(), 15);
/// assert_eq!(history.last().map(|p| p.date), Some(today));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticHistory {
    /// Click level on the first generated day.
    pub base_clicks: f64,
    /// Added to the base level after every generated day.
    pub daily_drift: f64,
    /// Amplitude of the weekday sinusoid.
    pub seasonal_amplitude: f64,
    /// Bound of the uniform per-day noise.
    pub noise_amplitude: f64,
    /// Clicks removed on weekend days.
    pub weekend_penalty: f64,
    /// Minimum emitted click count.
    pub floor: f64,
}

impl Default for SyntheticHistory {
    fn default() -> Self {
        Self {
            base_clicks: 1200.0,
            daily_drift: 0.02,
            seasonal_amplitude: 200.0,
            noise_amplitude: 200.0,
            weekend_penalty: 150.0,
            floor: 100.0,
        }
    }
}

impl From<&GeneratorConfig> for SyntheticHistory {
    fn from(cfg: &GeneratorConfig) -> Self {
        Self {
            base_clicks: cfg.base_clicks,
            daily_drift: cfg.daily_drift,
            seasonal_amplitude: cfg.seasonal_amplitude,
            noise_amplitude: cfg.noise_amplitude,
            weekend_penalty: cfg.weekend_penalty,
            floor: cfg.floor,
        }
    }
}

impl SyntheticHistory {
    /// Generates one point per day from `reference_date - lookback_days`
    /// through `reference_date`, inclusive.
    ///
    /// # Arguments
    ///
    /// * `reference_date` - Last day of the series (usually today)
    /// * `lookback_days` - Days before `reference_date` to cover
    /// * `jitter` - Source of the per-day noise
    ///
    /// # Returns
    ///
    /// `lookback_days + 1` historical points in ascending date order.
    /// Lookbacks above [`MAX_LOOKBACK_DAYS`] are clamped to it, and the series
    /// never starts before `NaiveDate::MIN`.
    pub fn generate(
        &self,
        reference_date: NaiveDate,
        lookback_days: u32,
        jitter: &mut impl Jitter,
    ) -> Vec<TrafficPoint> {
        if lookback_days > MAX_LOOKBACK_DAYS {
            warn!(lookback_days, max = MAX_LOOKBACK_DAYS, "lookback clamped");
        }
        let lookback = lookback_days.min(MAX_LOOKBACK_DAYS);
        let start = reference_date
            .checked_sub_days(Days::new(u64::from(lookback)))
            .unwrap_or(NaiveDate::MIN);
        let span = usize::try_from((reference_date - start).num_days()).unwrap_or(0);

        let mut base = self.base_clicks;
        let mut points = Vec::with_capacity(span + 1);
        for date in start.iter_days().take_while(|d| *d <= reference_date) {
            let weekday = date.weekday().num_days_from_sunday();
            let seasonal = self.seasonal_amplitude
                * (2.0 * std::f64::consts::PI * f64::from(weekday) / 365.0).sin();
            let noise = jitter.draw(self.noise_amplitude);
            let weekend = if weekday == 0 || weekday == 6 {
                -self.weekend_penalty
            } else {
                0.0
            };

            let clicks = (base + seasonal + noise + weekend).round().max(self.floor);
            points.push(TrafficPoint::historical(date, to_count(clicks)));

            base += self.daily_drift;
        }
        points
    }
}

/// Generates a synthetic history with the default parameters.
pub fn generate(
    reference_date: NaiveDate,
    lookback_days: u32,
    jitter: &mut impl Jitter,
) -> Vec<TrafficPoint> {
    SyntheticHistory::default().generate(reference_date, lookback_days, jitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::NoJitter;
    use rand::{SeedableRng, rngs::StdRng};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_lookback_covers_481_days() {
        let mut rng = StdRng::seed_from_u64(1);
        let today = date(2025, 10, 1);
        let points = generate(today, DEFAULT_LOOKBACK_DAYS, &mut rng);
        assert_eq!(points.len(), 481);
        assert_eq!(points[0].date, date(2024, 6, 8));
        assert_eq!(points[480].date, today);
    }

    #[test]
    fn dates_are_contiguous_and_ascending() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = generate(date(2024, 3, 15), 60, &mut rng);
        for pair in points.windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }

    #[test]
    fn all_points_are_historical_and_floored() {
        let mut rng = StdRng::seed_from_u64(9);
        let harsh = SyntheticHistory {
            base_clicks: 50.0,
            ..SyntheticHistory::default()
        };
        for p in harsh.generate(date(2025, 2, 1), 100, &mut rng) {
            assert!(!p.is_forecast);
            assert!(p.forecast_clicks.is_none());
            assert!(p.value() >= 100, "{p} below floor");
        }
    }

    #[test]
    fn zero_lookback_yields_single_day() {
        let points = generate(date(2025, 1, 1), 0, &mut NoJitter);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, date(2025, 1, 1));
    }

    #[test]
    fn noiseless_values_follow_weekday_formula() {
        // 2025-01-05 is a Sunday, 2025-01-06 a Monday.
        let points = generate(date(2025, 1, 6), 1, &mut NoJitter);
        // Sunday: index 0, sin(0) = 0, weekend penalty applies.
        assert_eq!(points[0].clicks, Some(1050));
        // Monday: index 1, base drifted by 0.02.
        let expected = (1200.02 + 200.0 * (2.0 * std::f64::consts::PI / 365.0).sin()).round();
        assert_eq!(points[1].clicks, Some(expected as u32));
    }

    #[test]
    fn saturday_and_midweek_follow_weekday_formula() {
        // 2025-01-08 is a Wednesday, 2025-01-11 a Saturday.
        let points = generate(date(2025, 1, 11), 3, &mut NoJitter);
        let seasonal = |idx: f64| 200.0 * (2.0 * std::f64::consts::PI * idx / 365.0).sin();

        assert_eq!(points[0].date, date(2025, 1, 8));
        let wednesday = (1200.0 + seasonal(3.0)).round();
        assert_eq!(points[0].clicks, Some(wednesday as u32));

        // Friday carries no weekend penalty.
        let friday = (1200.04 + seasonal(5.0)).round();
        assert_eq!(points[2].clicks, Some(friday as u32));

        let saturday = (1200.06 + seasonal(6.0) - 150.0).round();
        assert_eq!(points[3].date, date(2025, 1, 11));
        assert_eq!(points[3].clicks, Some(saturday as u32));
        assert_eq!(points[3].clicks, Some(1071));
    }

    #[test]
    fn oversized_lookback_is_clamped() {
        let today = date(2025, 1, 1);
        let points = generate(today, u32::MAX, &mut NoJitter);
        assert_eq!(points.len(), MAX_LOOKBACK_DAYS as usize + 1);
        assert_eq!(points[0].date, today - Days::new(u64::from(MAX_LOOKBACK_DAYS)));
        assert_eq!(points.last().map(|p| p.date), Some(today));
    }

    #[test]
    fn lookback_past_calendar_start_begins_at_min_date() {
        let reference = NaiveDate::MIN + Days::new(10);
        let points = generate(reference, 100, &mut NoJitter);
        assert_eq!(points.len(), 11);
        assert_eq!(points[0].date, NaiveDate::MIN);
    }

    #[test]
    fn drift_accumulates_across_the_run() {
        let flat = SyntheticHistory {
            seasonal_amplitude: 0.0,
            weekend_penalty: 0.0,
            daily_drift: 1.0,
            ..SyntheticHistory::default()
        };
        let points = flat.generate(date(2025, 1, 10), 9, &mut NoJitter);
        let values: Vec<u32> = points.iter().map(TrafficPoint::value).collect();
        assert_eq!(values, (1200..1210).collect::<Vec<u32>>());
    }
}
