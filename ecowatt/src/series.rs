//! Chronologically ordered consumption series

use crate::error::{EcoWattError, Result};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fmt;
use std::str::FromStr;

/// Sampling frequency of a series or forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Minute,
    Hourly,
    #[default]
    Daily,
    Weekly,
}

impl Frequency {
    /// Distance between two consecutive timestamps
    pub fn step(&self) -> Duration {
        match self {
            Frequency::Minute => Duration::minutes(1),
            Frequency::Hourly => Duration::hours(1),
            Frequency::Daily => Duration::days(1),
            Frequency::Weekly => Duration::weeks(1),
        }
    }

    /// Timestamps `1..=count` steps after `last`
    pub fn following(&self, last: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
        let step = self.step();
        let mut current = last;
        let mut timestamps = Vec::with_capacity(count);
        for _ in 0..count {
            current += step;
            timestamps.push(current);
        }
        timestamps
    }
}

impl FromStr for Frequency {
    type Err = EcoWattError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "minute" | "min" | "1min" => Ok(Frequency::Minute),
            "hourly" | "h" | "1h" => Ok(Frequency::Hourly),
            "daily" | "d" | "1d" => Ok(Frequency::Daily),
            "weekly" | "w" | "1w" => Ok(Frequency::Weekly),
            other => Err(EcoWattError::InvalidArgument(format!(
                "Unsupported frequency: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Minute => "minute",
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        };
        f.write_str(name)
    }
}

/// A single (timestamp, consumption) point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Consumption series with strictly increasing timestamps and finite values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Create a series from observations that are already in chronological order.
    ///
    /// Out-of-order or duplicate timestamps are rejected, not repaired; use
    /// [`Series::from_unsorted`] at ingestion boundaries.
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        if let Some(i) = observations.iter().position(|o| !o.value.is_finite()) {
            return Err(EcoWattError::InvalidArgument(format!(
                "Observation {} at {} has non-finite value {}",
                i, observations[i].timestamp, observations[i].value
            )));
        }

        if let Some(i) = observations
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(EcoWattError::InvalidArgument(format!(
                "Timestamps must be strictly increasing: {} follows {}",
                observations[i + 1].timestamp,
                observations[i].timestamp
            )));
        }

        Ok(Self { observations })
    }

    /// Sort observations chronologically, then validate as [`Series::new`] does
    pub fn from_unsorted(mut observations: Vec<Observation>) -> Result<Self> {
        observations.sort_by_key(|o| o.timestamp);
        Self::new(observations)
    }

    /// Build a series from parallel timestamp and value vectors
    pub fn from_parts(timestamps: Vec<NaiveDateTime>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(EcoWattError::InvalidArgument(format!(
                "{} timestamps but {} values",
                timestamps.len(),
                values.len()
            )));
        }

        Self::new(
            timestamps
                .into_iter()
                .zip(values)
                .map(|(timestamp, value)| Observation { timestamp, value })
                .collect(),
        )
    }

    /// Get the observations in chronological order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Get the values as a vector
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Get the timestamps as a vector
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.observations.iter().map(|o| o.timestamp).collect()
    }

    /// Timestamp of the most recent observation
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.observations.last().map(|o| o.timestamp)
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Get a slice of the series from start to end index
    pub fn slice(&self, start: usize, end: Option<usize>) -> Result<Self> {
        let end = end.unwrap_or(self.observations.len());
        if start > end || end > self.observations.len() {
            return Err(EcoWattError::InvalidArgument(format!(
                "Slice {}..{} out of bounds for series of length {}",
                start,
                end,
                self.observations.len()
            )));
        }

        Ok(Self {
            observations: self.observations[start..end].to_vec(),
        })
    }

    /// Descriptive statistics of the values, `None` for an empty series
    pub fn summary(&self) -> Option<SeriesSummary> {
        if self.is_empty() {
            return None;
        }

        let values = self.values();
        Some(SeriesSummary {
            points: values.len(),
            mean: Statistics::mean(values.iter()),
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
            std_dev: Statistics::population_std_dev(values.iter()),
        })
    }
}

/// Descriptive statistics of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub points: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Series Summary:")?;
        writeln!(f, "  Points:  {}", self.points)?;
        writeln!(f, "  Mean:    {:.1} kWh", self.mean)?;
        writeln!(f, "  Min:     {:.1} kWh", self.min)?;
        writeln!(f, "  Max:     {:.1} kWh", self.max)?;
        writeln!(f, "  Std Dev: {:.2}", self.std_dev)?;
        Ok(())
    }
}
