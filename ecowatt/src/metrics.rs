//! Metrics for evaluating forecast performance

use crate::error::{EcoWattError, Result};
use crate::features::{build_features, LagWindow};
use crate::model::{FitOptions, LagRegression};
use crate::predictor::forecast;
use crate::series::Series;
use tracing::info;

/// Share of rows used for training by default
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// Forecast accuracy metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error (zero actuals skipped)
    pub mape: f64,
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        Ok(())
    }
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(EcoWattError::InvalidArgument(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;
    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual)
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    let (pct_sum, pct_count) = actual
        .iter()
        .zip(&errors)
        .filter(|(a, _)| **a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (&a, &e)| {
            (sum + e.abs() / a.abs() * 100.0, count + 1)
        });
    let mape = if pct_count > 0 {
        pct_sum / pct_count as f64
    } else {
        0.0
    };

    Ok(ForecastAccuracy {
        mae,
        mse,
        rmse,
        mape,
    })
}

/// Outcome of a chronological train/test evaluation
#[derive(Debug, Clone)]
pub struct HoldoutReport {
    /// Model fitted on the training share
    pub model: LagRegression,
    /// Number of training rows
    pub train_rows: usize,
    /// Number of held-out rows
    pub test_rows: usize,
    /// Accuracy on the held-out rows
    pub accuracy: ForecastAccuracy,
}

fn split_index(len: usize, train_ratio: f64) -> Result<usize> {
    if !(train_ratio > 0.0 && train_ratio < 1.0) {
        return Err(EcoWattError::InvalidArgument(format!(
            "train ratio must be between 0 and 1, got {}",
            train_ratio
        )));
    }
    Ok((len as f64 * train_ratio).floor() as usize)
}

/// Fit on the first `train_ratio` of the lag rows and score one-step
/// predictions on the remaining rows
pub fn evaluate_holdout(
    series: &Series,
    lag: usize,
    train_ratio: f64,
    options: FitOptions,
) -> Result<HoldoutReport> {
    let (features, targets) = build_features(series, lag)?;
    let split = split_index(features.len(), train_ratio)?;
    if split == 0 || split == features.len() {
        return Err(EcoWattError::InsufficientData {
            needed: lag + 2,
            got: series.len(),
        });
    }

    let (train_x, test_x) = features.split_at(split);
    let (train_y, test_y) = targets.split_at(split);

    let model = LagRegression::fit_with(&train_x, train_y, options)?;
    let predictions = model.predict_matrix(&test_x)?;
    let accuracy = forecast_accuracy(&predictions, test_y)?;

    info!(
        train_rows = train_x.len(),
        test_rows = test_x.len(),
        mse = accuracy.mse,
        "holdout evaluation"
    );

    Ok(HoldoutReport {
        model,
        train_rows: train_x.len(),
        test_rows: test_x.len(),
        accuracy,
    })
}

/// Fit on the first `train_ratio` of the series and score a recursive
/// forecast over the rest, exposing the drift of fed-back predictions
pub fn evaluate_recursive_holdout(
    series: &Series,
    lag: usize,
    train_ratio: f64,
    options: FitOptions,
) -> Result<HoldoutReport> {
    let split = split_index(series.len(), train_ratio)?;
    if split <= lag || split == series.len() {
        return Err(EcoWattError::InsufficientData {
            needed: lag + 2,
            got: series.len(),
        });
    }

    let train = series.slice(0, Some(split))?;
    let actual = series.slice(split, None)?.values();
    let (features, targets) = build_features(&train, lag)?;
    let model = LagRegression::fit_with(&features, &targets, options)?;

    let initial = LagWindow::from_series_tail(&train, lag)?;
    let predictions = forecast(&model, &initial, actual.len())?;
    let accuracy = forecast_accuracy(&predictions, &actual)?;

    info!(
        train_rows = features.len(),
        horizon = actual.len(),
        mse = accuracy.mse,
        "recursive holdout evaluation"
    );

    Ok(HoldoutReport {
        model,
        train_rows: features.len(),
        test_rows: actual.len(),
        accuracy,
    })
}
