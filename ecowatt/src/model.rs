//! Linear lag regression model

use crate::error::{EcoWattError, Result};
use crate::features::{FeatureMatrix, LagWindow};
use forecast_math::fit_with_intercept;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Options controlling how strict [`LagRegression::fit_with`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FitOptions {
    /// Fail with `DegenerateInput` instead of returning the minimum-norm
    /// solution when the lag columns are linearly dependent
    pub reject_rank_deficient: bool,
}

/// Affine map from a lag window to the next value.
///
/// `weights[k]` multiplies lag `k + 1`; the model is immutable once fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagRegression {
    weights: Vec<f64>,
    bias: f64,
    rank: usize,
    training_rows: usize,
}

impl LagRegression {
    /// Build a model from known coefficients
    pub fn from_parts(weights: Vec<f64>, bias: f64) -> Result<Self> {
        let rank = weights.len();
        let model = Self {
            weights,
            bias,
            rank,
            training_rows: 0,
        };
        model.validate()?;
        Ok(model)
    }

    /// Fit by ordinary least squares with an intercept
    pub fn fit(features: &FeatureMatrix, targets: &[f64]) -> Result<Self> {
        Self::fit_with(features, targets, FitOptions::default())
    }

    /// Fit with explicit options
    pub fn fit_with(features: &FeatureMatrix, targets: &[f64], options: FitOptions) -> Result<Self> {
        if features.is_empty() {
            return Err(EcoWattError::InsufficientData { needed: 1, got: 0 });
        }
        if targets.len() != features.len() {
            return Err(EcoWattError::InvalidArgument(format!(
                "{} feature rows but {} targets",
                features.len(),
                targets.len()
            )));
        }
        if features.rows().iter().flatten().any(|v| !v.is_finite())
            || targets.iter().any(|v| !v.is_finite())
        {
            return Err(EcoWattError::DegenerateInput(
                "training data contains non-finite values".to_string(),
            ));
        }

        let solution = fit_with_intercept(features.rows(), targets)?;

        if solution.is_rank_deficient() {
            if options.reject_rank_deficient {
                return Err(EcoWattError::DegenerateInput(format!(
                    "lag columns have rank {} of {}",
                    solution.rank(),
                    solution.columns()
                )));
            }
            warn!(
                rank = solution.rank(),
                columns = solution.columns(),
                rows = features.len(),
                "rank-deficient lag design, using minimum-norm weights"
            );
        }

        let model = Self {
            weights: solution.coefficients().to_vec(),
            bias: solution.intercept(),
            rank: solution.rank(),
            training_rows: solution.observations(),
        };

        info!(
            lag = model.lag(),
            rows = model.training_rows,
            rank = model.rank,
            bias = model.bias,
            "fitted lag regression"
        );

        Ok(model)
    }

    /// Check that the model is usable: at least one weight, all parts finite
    pub fn validate(&self) -> Result<()> {
        if self.weights.is_empty() {
            return Err(EcoWattError::InvalidArgument(
                "model must have at least one weight".to_string(),
            ));
        }
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(EcoWattError::InvalidArgument(
                "model weights and bias must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Lag depth the model was trained with
    pub fn lag(&self) -> usize {
        self.weights.len()
    }

    /// Weights in lag-1-first order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Intercept
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Numerical rank of the centred training design
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Whether the training design was rank deficient
    pub fn is_rank_deficient(&self) -> bool {
        self.rank < self.weights.len()
    }

    /// Number of rows the model was fitted on (0 for hand-built models)
    pub fn training_rows(&self) -> usize {
        self.training_rows
    }

    /// Predict the value following `window`
    pub fn predict(&self, window: &LagWindow) -> Result<f64> {
        self.predict_row(&window.feature_row())
    }

    /// Predict from a feature row already in lag-1-first order
    pub fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.weights.len() {
            return Err(EcoWattError::InvalidArgument(format!(
                "expected {} lag values, got {}",
                self.weights.len(),
                row.len()
            )));
        }

        let value = self.bias
            + self
                .weights
                .iter()
                .zip(row)
                .map(|(w, x)| w * x)
                .sum::<f64>();

        if !value.is_finite() {
            return Err(EcoWattError::DegenerateInput(format!(
                "prediction is not finite ({})",
                value
            )));
        }
        Ok(value)
    }

    /// One-step predictions for every row of `features`
    pub fn predict_matrix(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        features.rows().iter().map(|row| self.predict_row(row)).collect()
    }
}
