//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use rand::{SeedableRng, rngs::StdRng};
use traffic_forecast::series::TrafficPoint;

/// Fixed first day of every fixture history.
pub fn history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Contiguous history starting at [`history_start`] with the given values.
pub fn history_from(values: &[u32]) -> Vec<TrafficPoint> {
    history_start()
        .iter_days()
        .zip(values)
        .map(|(d, &v)| TrafficPoint::historical(d, v))
        .collect()
}

/// `days` of constant clicks.
pub fn constant_history(days: usize, clicks: u32) -> Vec<TrafficPoint> {
    history_from(&vec![clicks; days])
}

/// Seeded random source (seed 42).
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}
