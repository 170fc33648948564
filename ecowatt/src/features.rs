//! Lag feature construction
//!
//! [`LagWindow`] is the only place that knows how a run of past values maps
//! onto a feature row. Training rows and the rows used during recursive
//! prediction are both produced by it, so the two cannot disagree on order.

use crate::error::{EcoWattError, Result};
use crate::series::Series;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Default lag depth (one week of daily observations)
pub const DEFAULT_LAG: usize = 7;

/// Targets aligned row-for-row with a [`FeatureMatrix`]
pub type TargetVector = Vec<f64>;

/// The `lag` most recent values before a target, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct LagWindow {
    values: VecDeque<f64>,
}

impl LagWindow {
    /// Build a window from values in chronological order (oldest..newest)
    pub fn new(chronological: &[f64]) -> Result<Self> {
        if chronological.is_empty() {
            return Err(EcoWattError::InvalidArgument(
                "lag window must hold at least one value".to_string(),
            ));
        }

        Ok(Self {
            values: chronological.iter().copied().collect(),
        })
    }

    /// The last `lag` values of a series
    pub fn from_series_tail(series: &Series, lag: usize) -> Result<Self> {
        validate_lag(lag)?;
        if series.len() < lag {
            return Err(EcoWattError::InsufficientData {
                needed: lag,
                got: series.len(),
            });
        }

        let tail: Vec<f64> = series.observations()[series.len() - lag..]
            .iter()
            .map(|o| o.value)
            .collect();
        Self::new(&tail)
    }

    /// Number of values held
    pub fn lag(&self) -> usize {
        self.values.len()
    }

    /// Values oldest..newest
    pub fn chronological(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Feature row in lag order: `[lag_1, lag_2, ..., lag_L]`, newest first
    pub fn feature_row(&self) -> Vec<f64> {
        self.values.iter().rev().copied().collect()
    }

    /// Drop the oldest value and append `newest`
    pub fn push(&mut self, newest: f64) {
        self.values.pop_front();
        self.values.push_back(newest);
    }
}

/// Lag feature rows, one per target index, in chronological row order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureMatrix {
    lag: usize,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Wrap pre-built rows; every row must have exactly `lag` values
    pub fn new(lag: usize, rows: Vec<Vec<f64>>) -> Result<Self> {
        validate_lag(lag)?;
        if let Some(i) = rows.iter().position(|r| r.len() != lag) {
            return Err(EcoWattError::InvalidArgument(format!(
                "feature row {} has {} values, expected {}",
                i,
                rows[i].len(),
                lag
            )));
        }
        Ok(Self { lag, rows })
    }

    /// Lag depth (row width)
    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Rows in lag-1-first order
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Split rows at `index` into a leading and trailing matrix
    pub fn split_at(&self, index: usize) -> (FeatureMatrix, FeatureMatrix) {
        let index = index.min(self.rows.len());
        let (head, tail) = self.rows.split_at(index);
        (
            FeatureMatrix {
                lag: self.lag,
                rows: head.to_vec(),
            },
            FeatureMatrix {
                lag: self.lag,
                rows: tail.to_vec(),
            },
        )
    }
}

fn validate_lag(lag: usize) -> Result<()> {
    if lag == 0 {
        return Err(EcoWattError::InvalidArgument(
            "lag must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Build lag features from raw values in chronological order.
///
/// For each index `i >= lag` the target is `values[i]` and the row holds
/// `values[i-1], ..., values[i-lag]`. Inputs of length `<= lag` produce an
/// empty matrix.
pub fn build_features_from_values(
    values: &[f64],
    lag: usize,
) -> Result<(FeatureMatrix, TargetVector)> {
    validate_lag(lag)?;

    let rows_expected = values.len().saturating_sub(lag);
    let mut rows = Vec::with_capacity(rows_expected);
    let mut targets = Vec::with_capacity(rows_expected);

    for i in lag..values.len() {
        let window = LagWindow::new(&values[i - lag..i])?;
        rows.push(window.feature_row());
        targets.push(values[i]);
    }

    debug!(points = values.len(), lag, rows = rows.len(), "built lag features");

    Ok((FeatureMatrix { lag, rows }, targets))
}

/// Build lag features from a series
pub fn build_features(series: &Series, lag: usize) -> Result<(FeatureMatrix, TargetVector)> {
    build_features_from_values(&series.values(), lag)
}
