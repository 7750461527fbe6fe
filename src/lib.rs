//! Daily traffic forecasting: synthetic history and trailing-window trend
//! projection.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod forecast;
/// Synthetic daily history generator.
pub mod generator;
pub mod io;
pub mod jitter;
pub mod pipeline;
pub mod series;
pub mod summary;
