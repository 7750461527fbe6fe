//! CSV import of an observed daily click history.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::series::TrafficPoint;

/// Errors raised while loading a history file.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open \"{path}\": {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid CSV header: {0}")]
    Header(#[source] csv::Error),
    /// `row` is the 1-based data row, not counting the header.
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// One `date,clicks` record.
#[derive(Debug, Deserialize)]
struct HistoryRow {
    date: NaiveDate,
    clicks: u32,
}

/// Loads a `date,clicks` CSV file into historical points.
///
/// # Errors
///
/// Returns an `ImportError` if the file cannot be opened or any row fails to
/// parse.
pub fn load_history_csv(path: &Path) -> Result<Vec<TrafficPoint>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_history(io::BufReader::new(file))
}

/// Reads `date,clicks` CSV records from any reader.
///
/// Rows are taken in file order; ordering and gaps are the supplier's
/// responsibility. Extra columns are ignored.
///
/// # Errors
///
/// Returns an `ImportError` naming the first row that fails to parse.
pub fn read_history(reader: impl Read) -> Result<Vec<TrafficPoint>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    rdr.headers().map_err(ImportError::Header)?;

    rdr.deserialize::<HistoryRow>()
        .enumerate()
        .map(|(i, rec)| {
            rec.map(|r| TrafficPoint::historical(r.date, r.clicks))
                .map_err(|source| ImportError::Row { row: i + 1, source })
        })
        .collect()
}
