//! CSV ingestion and export of consumption series and forecasts

use crate::error::{EcoWattError, Result};
use crate::predictor::Forecast;
use crate::series::{Observation, Series};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// Required timestamp column
pub const DATE_COLUMN: &str = "date";
/// Optional time-of-day column, combined with `date` when present
pub const TIME_COLUMN: &str = "time";
/// Required consumption column
pub const CONSUMPTION_COLUMN: &str = "consumption_kwh";
/// Value column of exported forecasts
pub const FORECAST_COLUMN: &str = "predicted_consumption";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Data loader for consumption tables
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a series from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Series> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let series = Self::from_reader(file)?;
        info!(path = %path.display(), points = series.len(), "loaded consumption series");
        Ok(series)
    }

    /// Load a series from any CSV source.
    ///
    /// Rows are sorted chronologically; duplicate timestamps are rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<Series> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

        let (date_idx, value_idx) = match (find(DATE_COLUMN), find(CONSUMPTION_COLUMN)) {
            (Some(d), Some(v)) => (d, v),
            _ => {
                return Err(EcoWattError::Data(format!(
                    "CSV must contain '{}' and '{}' columns (optional: '{}')",
                    DATE_COLUMN, CONSUMPTION_COLUMN, TIME_COLUMN
                )))
            }
        };
        let time_idx = find(TIME_COLUMN);

        let mut observations = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let line = row + 2;

            let date = record.get(date_idx).unwrap_or_default();
            let timestamp = match time_idx {
                Some(t) => parse_date_and_time(date, record.get(t).unwrap_or_default()),
                None => parse_timestamp(date),
            }
            .map_err(|e| match e {
                EcoWattError::Parse(msg) => EcoWattError::Parse(format!("line {}: {}", line, msg)),
                other => other,
            })?;

            let raw = record.get(value_idx).unwrap_or_default();
            let value: f64 = raw.parse().map_err(|_| {
                EcoWattError::Parse(format!(
                    "line {}: '{}' is not a number in '{}'",
                    line, raw, CONSUMPTION_COLUMN
                ))
            })?;

            observations.push(Observation::new(timestamp, value));
        }

        Series::from_unsorted(observations)
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT) {
        return Ok(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts);
    }
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| EcoWattError::Parse(format!("invalid date '{}': {}", text, e)))?;
    Ok(date.and_time(NaiveTime::MIN))
}

/// Combine separate `YYYY-MM-DD` and `HH:MM:SS` fields
pub fn parse_date_and_time(date: &str, time: &str) -> Result<NaiveDateTime> {
    let combined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&combined, DATETIME_FORMAT)
        .map_err(|e| EcoWattError::Parse(format!("invalid date/time '{}': {}", combined, e)))
}

/// Render a timestamp as a bare date at midnight, with the time otherwise
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    if timestamp.time() == NaiveTime::MIN {
        timestamp.format(DATE_FORMAT).to_string()
    } else {
        timestamp.format(DATETIME_FORMAT).to_string()
    }
}

/// Write `date,consumption_kwh` rows
pub fn write_series_csv<W: Write>(series: &Series, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([DATE_COLUMN, CONSUMPTION_COLUMN])?;
    for o in series.observations() {
        writer.write_record([format_timestamp(&o.timestamp), o.value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a series to a CSV file
pub fn save_series_csv<P: AsRef<Path>>(series: &Series, path: P) -> Result<()> {
    let path = path.as_ref();
    write_series_csv(series, File::create(path)?)?;
    info!(path = %path.display(), points = series.len(), "saved consumption series");
    Ok(())
}

/// Write `date,predicted_consumption` rows
pub fn write_forecast_csv<W: Write>(forecast: &Forecast, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([DATE_COLUMN, FORECAST_COLUMN])?;
    for p in forecast.points() {
        writer.write_record([format_timestamp(&p.timestamp), p.value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a forecast to a CSV file
pub fn save_forecast_csv<P: AsRef<Path>>(forecast: &Forecast, path: P) -> Result<()> {
    let path = path.as_ref();
    write_forecast_csv(forecast, File::create(path)?)?;
    info!(path = %path.display(), horizon = forecast.horizon(), "saved forecast");
    Ok(())
}
