//! Recursive multi-step prediction
//!
//! Each prediction is pushed into the lag window and used as input for the
//! next step. After `lag` steps the window holds only model output, so errors
//! compound with the horizon; nothing bounds or corrects them.

use crate::error::{EcoWattError, Result};
use crate::features::LagWindow;
use crate::metrics::forecast_accuracy;
use crate::model::LagRegression;
use crate::series::{Frequency, Series};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Forecast `horizon` values starting from `initial`.
///
/// `initial` must hold exactly as many values as the model's lag; a horizon
/// of zero is rejected.
pub fn forecast(model: &LagRegression, initial: &LagWindow, horizon: usize) -> Result<Vec<f64>> {
    if horizon == 0 {
        return Err(EcoWattError::InvalidArgument(
            "horizon must be at least 1".to_string(),
        ));
    }
    if initial.lag() != model.lag() {
        return Err(EcoWattError::InvalidArgument(format!(
            "initial window has {} values, model lag is {}",
            initial.lag(),
            model.lag()
        )));
    }

    let mut window = initial.clone();
    let mut predictions = Vec::with_capacity(horizon);
    for _ in 0..horizon {
        let prediction = model.predict(&window)?;
        predictions.push(prediction);
        window.push(prediction);
    }

    debug!(horizon, lag = model.lag(), "recursive forecast complete");
    Ok(predictions)
}

/// Forecast past the end of `series`, dated one `frequency` step apart
pub fn forecast_series(
    model: &LagRegression,
    series: &Series,
    horizon: usize,
    frequency: Frequency,
) -> Result<Forecast> {
    let initial = LagWindow::from_series_tail(series, model.lag())?;
    let last = series.last_timestamp().ok_or(EcoWattError::InsufficientData {
        needed: model.lag(),
        got: 0,
    })?;

    let values = forecast(model, &initial, horizon)?;
    let timestamps = frequency.following(last, horizon);

    Ok(Forecast {
        points: timestamps
            .into_iter()
            .zip(values)
            .map(|(timestamp, value)| ForecastPoint { timestamp, value })
            .collect(),
    })
}

/// A dated predicted value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Forecast result: predicted values with their timestamps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    points: Vec<ForecastPoint>,
}

impl Forecast {
    /// Get the dated points
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Get the forecasted values
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Get the number of periods forecasted
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the forecast is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean absolute error against the observed values
    pub fn mean_absolute_error(&self, actual: &[f64]) -> Result<f64> {
        Ok(forecast_accuracy(&self.values(), actual)?.mae)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_horizon_is_rejected() {
        let model = LagRegression::from_parts(vec![1.0], 0.0).unwrap();
        let window = LagWindow::new(&[1.0]).unwrap();
        assert!(matches!(
            forecast(&model, &window, 0),
            Err(EcoWattError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_window_width_must_match_model() {
        let model = LagRegression::from_parts(vec![1.0, 0.0], 0.0).unwrap();
        let window = LagWindow::new(&[1.0, 2.0, 3.0]).unwrap();
        assert!(forecast(&model, &window, 3).is_err());
    }

    #[test]
    fn test_bias_only_model_is_flat() {
        let model = LagRegression::from_parts(vec![0.0], 5.0).unwrap();
        let window = LagWindow::new(&[1.0]).unwrap();
        let values = forecast(&model, &window, 2).unwrap();
        assert_eq!(values, vec![5.0, 5.0]);
    }
}
