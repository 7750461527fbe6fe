//! CSV and JSON export for combined traffic series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::series::TrafficPoint;

/// Column header for CSV export.
const HEADER: &str = "date,clicks,forecast_clicks,is_forecast";

/// Exports a series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(points: &[TrafficPoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(points, buf)
}

/// Writes a series as CSV to any writer.
///
/// One row per point; the count that does not apply to the row is left
/// empty, matching the `null`s of the JSON form.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(points: &[TrafficPoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for p in points {
        wtr.write_record(&[
            p.date.to_string(),
            optional_count(p.clicks),
            optional_count(p.forecast_clicks),
            p.is_forecast.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn optional_count(count: Option<u32>) -> String {
    count.map(|c| c.to_string()).unwrap_or_default()
}

/// Exports a series to a pretty-printed JSON file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization or writing fails.
pub fn export_json(points: &[TrafficPoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut buf = io::BufWriter::new(file);
    write_json(points, &mut buf)?;
    buf.flush()
}

/// Writes a series as a JSON array of camelCase point objects.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_json(points: &[TrafficPoint], writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, points)?;
    Ok(())
}
