//! Property tests for generator and forecast invariants.
//!
//! Uses proptest to verify:
//! 1. Forecast length: exactly `horizon` points once the history is long enough
//! 2. Forecast dates: contiguous days right after the last historical day
//! 3. Floors: no emitted count below 100
//! 4. Generator shape: `lookback + 1` contiguous days ending on the reference

mod common;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use traffic_forecast::forecast::calculate_forecast;
use traffic_forecast::generator::generate;

fn arb_values(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..5000, min_len..max_len)
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..20_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Days::new(offset)
    })
}

proptest! {
    #[test]
    fn forecast_length_matches_horizon(
        values in arb_values(30, 200),
        horizon in 0u32..120,
        seed in any::<u64>(),
    ) {
        let history = common::history_from(&values);
        let mut rng = StdRng::seed_from_u64(seed);
        let forecast = calculate_forecast(&history, horizon, &mut rng);
        prop_assert_eq!(forecast.len(), horizon as usize);
    }

    #[test]
    fn short_history_never_forecasts(
        values in arb_values(0, 30),
        horizon in 0u32..120,
        seed in any::<u64>(),
    ) {
        let history = common::history_from(&values);
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert!(calculate_forecast(&history, horizon, &mut rng).is_empty());
    }

    #[test]
    fn forecast_points_are_floored_and_contiguous(
        values in arb_values(30, 150),
        horizon in 1u32..90,
        seed in any::<u64>(),
    ) {
        let history = common::history_from(&values);
        let last = history.last().unwrap().date;
        let mut rng = StdRng::seed_from_u64(seed);
        let forecast = calculate_forecast(&history, horizon, &mut rng);

        for (i, p) in forecast.iter().enumerate() {
            prop_assert!(p.is_forecast);
            prop_assert!(p.clicks.is_none());
            prop_assert!(p.forecast_clicks.unwrap() >= 100);
            prop_assert_eq!(p.date, last + Days::new(i as u64 + 1));
        }
    }

    #[test]
    fn generator_shape(
        reference in arb_date(),
        lookback in 0u32..800,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let history = generate(reference, lookback, &mut rng);

        prop_assert_eq!(history.len(), lookback as usize + 1);
        prop_assert_eq!(history.last().unwrap().date, reference);
        for pair in history.windows(2) {
            prop_assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
        for p in &history {
            prop_assert!(!p.is_forecast);
            prop_assert!(p.clicks.unwrap() >= 100);
        }
    }
}
