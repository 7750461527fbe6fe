//! TOML-based run configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::generator::MAX_LOOKBACK_DAYS;

/// Upper bound for click levels and amplitudes; keeps every generated or
/// forecast count well inside `u32`.
pub const MAX_CLICK_LEVEL: f64 = 100_000_000.0;

/// Upper bound for the magnitude of the per-day drift.
pub const MAX_DAILY_DRIFT: f64 = 10_000.0;

/// Horizon lengths offered to users by the CLI and the API.
///
/// The forecast engine itself accepts any horizon.
pub const ALLOWED_HORIZONS: &[u32] = &[30, 60];

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults matching the baseline preset. Load from TOML
/// with [`ForecastConfig::from_toml_file`] or use
/// [`ForecastConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastConfig {
    /// Run-level inputs: horizon, data source, randomness.
    #[serde(default)]
    pub run: RunConfig,
    /// Synthetic history parameters.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Forecast engine parameters.
    #[serde(default)]
    pub forecast: ForecastEngineConfig,
}

/// Run-level inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Days to project past the last historical day (must be > 0).
    pub horizon_days: u32,
    /// Days of synthetic history before the reference date.
    pub lookback_days: u32,
    /// Last day of the synthetic history; today when unset.
    pub reference_date: Option<NaiveDate>,
    /// Seed for all jitter draws; OS entropy when unset.
    pub seed: Option<u64>,
    /// CSV file with the real daily history; synthetic data when unset.
    pub history_csv: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            lookback_days: crate::generator::DEFAULT_LOOKBACK_DAYS,
            reference_date: None,
            seed: None,
            history_csv: None,
        }
    }
}

/// Synthetic history parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Click level on the first generated day.
    pub base_clicks: f64,
    /// Upward drift added per day.
    pub daily_drift: f64,
    /// Weekday sinusoid amplitude.
    pub seasonal_amplitude: f64,
    /// Uniform noise bound.
    pub noise_amplitude: f64,
    /// Clicks removed on weekends (positive magnitude).
    pub weekend_penalty: f64,
    /// Minimum clicks per day.
    pub floor: f64,
}

impl Default for GeneratorConfig {
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

/// Forecast engine parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastEngineConfig {
    /// Histories shorter than this produce no forecast.
    pub min_history: usize,
    /// Trailing points used for the regression.
    pub window: usize,
    /// Uniform noise bound on projected days.
    pub jitter_amplitude: f64,
    /// Minimum projected clicks per day.
    pub floor: f64,
}

impl Default for ForecastEngineConfig {
    fn default() -> Self {
        Self {
            min_history: 30,
            window: 90,
            jitter_amplitude: 50.0,
            floor: 100.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"run.horizon_days"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ForecastConfig {
    /// Returns the baseline configuration: 30-day horizon, default model.
    pub fn baseline() -> Self {
        Self {
            run: RunConfig::default(),
            generator: GeneratorConfig::default(),
            forecast: ForecastEngineConfig::default(),
        }
    }

    /// Returns the extended preset: 60-day horizon.
    pub fn extended() -> Self {
        Self {
            run: RunConfig {
                horizon_days: 60,
                ..RunConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the noiseless preset: no jitter anywhere, fixed seed.
    ///
    /// Useful for inspecting the bare trend line.
    pub fn noiseless() -> Self {
        Self {
            run: RunConfig {
                seed: Some(0),
                ..RunConfig::default()
            },
            generator: GeneratorConfig {
                noise_amplitude: 0.0,
                ..GeneratorConfig::default()
            },
            forecast: ForecastEngineConfig {
                jitter_amplitude: 0.0,
                ..ForecastEngineConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "extended", "noiseless"];

    /// Loads a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "extended" => Ok(Self::extended()),
            "noiseless" => Ok(Self::noiseless()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.run.horizon_days == 0 {
            errors.push(ConfigError::new("run.horizon_days", "must be > 0"));
        }
        if self.run.lookback_days > MAX_LOOKBACK_DAYS {
            errors.push(ConfigError::new(
                "run.lookback_days",
                format!("must be <= {MAX_LOOKBACK_DAYS}"),
            ));
        }

        let g = &self.generator;
        for (field, value) in [
            ("generator.base_clicks", g.base_clicks),
            ("generator.daily_drift", g.daily_drift),
            ("generator.seasonal_amplitude", g.seasonal_amplitude),
        ] {
            if !value.is_finite() {
                errors.push(ConfigError::new(field, "must be finite"));
            }
        }
        for (field, value) in [
            ("generator.base_clicks", g.base_clicks),
            ("generator.seasonal_amplitude", g.seasonal_amplitude),
        ] {
            if value.abs() > MAX_CLICK_LEVEL {
                errors.push(ConfigError::new(field, format!("must be within ±{MAX_CLICK_LEVEL}")));
            }
        }
        if g.daily_drift.abs() > MAX_DAILY_DRIFT {
            errors.push(ConfigError::new(
                "generator.daily_drift",
                format!("must be within ±{MAX_DAILY_DRIFT}"),
            ));
        }
        for (field, value) in [
            ("generator.noise_amplitude", g.noise_amplitude),
            ("generator.weekend_penalty", g.weekend_penalty),
            ("generator.floor", g.floor),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ConfigError::new(field, "must be finite and >= 0"));
            } else if value > MAX_CLICK_LEVEL {
                errors.push(ConfigError::new(field, format!("must be <= {MAX_CLICK_LEVEL}")));
            }
        }

        let f = &self.forecast;
        if f.min_history == 0 {
            errors.push(ConfigError::new("forecast.min_history", "must be > 0"));
        }
        if f.window == 0 {
            errors.push(ConfigError::new("forecast.window", "must be > 0"));
        }
        for (field, value) in [
            ("forecast.jitter_amplitude", f.jitter_amplitude),
            ("forecast.floor", f.floor),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ConfigError::new(field, "must be finite and >= 0"));
            } else if value > MAX_CLICK_LEVEL {
                errors.push(ConfigError::new(field, format!("must be <= {MAX_CLICK_LEVEL}")));
            }
        }

        errors
    }
}
