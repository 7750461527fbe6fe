//! File formats at the edges of the pipeline.

/// CSV and JSON writers for combined series.
pub mod export;
/// CSV reader for observed daily history.
pub mod import;
