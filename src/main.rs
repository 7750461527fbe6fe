//! Traffic forecast entry point: CLI wiring and config-driven pipeline run.

use std::path::PathBuf;
use std::process;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use traffic_forecast::config::{ALLOWED_HORIZONS, ForecastConfig};
use traffic_forecast::io::export::{export_csv, export_json};
use traffic_forecast::pipeline;

/// Default log directive when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "traffic_forecast=info";

#[derive(Parser)]
#[command(
    name = "traffic-forecast",
    about = "Project daily search traffic forward along its recent trend"
)]
struct Cli {
    /// Load settings from a TOML config file.
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Use a built-in preset: baseline, extended, noiseless.
    #[arg(long)]
    preset: Option<String>,

    /// CSV file with `date,clicks` rows; synthetic history when omitted.
    #[arg(long)]
    history: Option<PathBuf>,

    /// Forecast horizon in days (30 or 60).
    #[arg(long, value_parser = parse_horizon)]
    horizon: Option<u32>,

    /// Seed for all random draws.
    #[arg(long)]
    seed: Option<u64>,

    /// Last day of the synthetic history (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Print every day of the combined series.
    #[arg(long, default_value_t = false)]
    print_series: bool,

    /// Export the combined series to CSV.
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Export the combined series to JSON.
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Start the REST API server after the run.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = false)]
    serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

fn parse_horizon(s: &str) -> Result<u32, String> {
    let days: u32 = s
        .parse()
        .map_err(|_| format!("\"{s}\" is not a number of days"))?;
    if ALLOWED_HORIZONS.contains(&days) {
        Ok(days)
    } else {
        Err(format!("horizon must be one of {ALLOWED_HORIZONS:?}"))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolves the config source: `--config`, then `--preset`, then baseline.
fn load_config(cli: &Cli) -> ForecastConfig {
    let loaded = if let Some(ref path) = cli.config {
        ForecastConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        ForecastConfig::from_preset(name)
    } else {
        Ok(ForecastConfig::baseline())
    };

    let mut cfg = loaded.unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });

    if let Some(ref path) = cli.history {
        cfg.run.history_csv = Some(path.clone());
    }
    if let Some(days) = cli.horizon {
        cfg.run.horizon_days = days;
    }
    if let Some(seed) = cli.seed {
        cfg.run.seed = Some(seed);
    }
    if let Some(date) = cli.reference_date {
        cfg.run.reference_date = Some(date);
    }
    cfg
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let cfg = load_config(&cli);
    let today = Local::now().date_naive();

    let run = pipeline::run(&cfg, today).unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });

    let combined = run.combined();
    if cli.print_series {
        for p in &combined {
            println!("{p}");
        }
        println!();
    }
    println!("History source:        {}", run.origin);
    println!("{}", run.summary());

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&combined, path) {
            error!("failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "series written");
    }
    if let Some(ref path) = cli.json_out {
        if let Err(e) = export_json(&combined, path) {
            error!("failed to write JSON: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "series written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        use traffic_forecast::forecast::LinearTrendForecast;

        let state = Arc::new(traffic_forecast::api::AppState {
            history: run.history,
            engine: LinearTrendForecast::from(&cfg.forecast),
            default_horizon: cfg.run.horizon_days,
            seed: cfg.run.seed,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            error!("failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(traffic_forecast::api::serve(state, addr)) {
            error!("server error: {e}");
            process::exit(1);
        }
    }
}
