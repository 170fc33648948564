//! Ordinary least squares with an intercept term
//!
//! The design is centred column-wise and solved through a singular value
//! decomposition. Singular values below the tolerance are treated as zero,
//! so collinear or constant columns yield the minimum-norm solution instead
//! of an error.

use crate::{MathError, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Relative floor applied to the largest absolute design entry when
/// deciding whether a singular value is numerically zero.
const SCALE_TOLERANCE: f64 = 1e-10;

/// Result of a least squares fit: `y = intercept + sum(coefficients[j] * x[j])`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeastSquares {
    coefficients: Vec<f64>,
    intercept: f64,
    rank: usize,
    observations: usize,
}

impl LeastSquares {
    /// Coefficients, one per design column
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Intercept term
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Numerical rank of the centred design
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of columns in the design
    pub fn columns(&self) -> usize {
        self.coefficients.len()
    }

    /// Number of rows the fit was computed from
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Whether the centred design had fewer independent columns than columns
    pub fn is_rank_deficient(&self) -> bool {
        self.rank < self.coefficients.len()
    }

    /// Evaluate the fitted affine map on one row
    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(MathError::InvalidInput(format!(
                "Row has {} values, model expects {}",
                row.len(),
                self.coefficients.len()
            )));
        }

        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(w, x)| w * x)
                .sum::<f64>())
    }
}

/// Fit `targets ~ intercept + rows * coefficients` by least squares.
///
/// Every row must have the same, non-zero width and all values must be finite.
pub fn fit_with_intercept<R: AsRef<[f64]>>(rows: &[R], targets: &[f64]) -> Result<LeastSquares> {
    let n = rows.len();
    if n == 0 {
        return Err(MathError::InsufficientData(
            "Least squares needs at least one row".to_string(),
        ));
    }
    if targets.len() != n {
        return Err(MathError::InvalidInput(format!(
            "{} rows but {} targets",
            n,
            targets.len()
        )));
    }

    let k = rows[0].as_ref().len();
    if k == 0 {
        return Err(MathError::InvalidInput(
            "Rows must have at least one column".to_string(),
        ));
    }

    let mut max_abs: f64 = 0.0;
    for (i, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != k {
            return Err(MathError::InvalidInput(format!(
                "Row {} has {} values, expected {}",
                i,
                row.len(),
                k
            )));
        }
        if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(format!(
                "Row {} contains non-finite value {}",
                i, bad
            )));
        }
        max_abs = row.iter().fold(max_abs, |acc, v| acc.max(v.abs()));
    }
    if let Some(i) = targets.iter().position(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(format!(
            "Target {} is non-finite ({})",
            i, targets[i]
        )));
    }

    let x_mean: Vec<f64> = (0..k)
        .map(|j| rows.iter().map(|r| r.as_ref()[j]).sum::<f64>() / n as f64)
        .collect();
    let y_mean = targets.iter().sum::<f64>() / n as f64;

    let x_centred = DMatrix::from_fn(n, k, |i, j| rows[i].as_ref()[j] - x_mean[j]);
    let y_centred = DVector::from_iterator(n, targets.iter().map(|y| y - y_mean));

    let svd = x_centred.svd(true, true);
    let largest = svd.singular_values.iter().fold(0.0_f64, |acc, s| acc.max(*s));
    let tolerance = (largest * n.max(k) as f64 * f64::EPSILON)
        .max(max_abs * SCALE_TOLERANCE);

    let beta = svd
        .solve(&y_centred, tolerance)
        .map_err(|e| MathError::CalculationError(e.to_string()))?;
    let rank = svd.singular_values.iter().filter(|s| **s > tolerance).count();

    let coefficients: Vec<f64> = beta.iter().copied().collect();
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(MathError::CalculationError(
            "Least squares produced non-finite coefficients".to_string(),
        ));
    }

    let intercept = y_mean
        - coefficients
            .iter()
            .zip(&x_mean)
            .map(|(w, m)| w * m)
            .sum::<f64>();

    Ok(LeastSquares {
        coefficients,
        intercept,
        rank,
        observations: n,
    })
}
