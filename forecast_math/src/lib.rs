//! # Forecast Math
//!
//! Numeric kernels for lag-regression forecasting.
//! This crate provides an ordinary least squares solver with an intercept
//! term that stays well defined on rank-deficient designs.

use thiserror::Error;

pub mod regression;

pub use regression::{fit_with_intercept, LeastSquares};

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = MathError::InsufficientData("no rows".to_string());
        assert_eq!(err.to_string(), "Insufficient data for calculation: no rows");

        let err = MathError::InvalidInput("row 3 has width 2".to_string());
        assert_eq!(err.to_string(), "Invalid input: row 3 has width 2");
    }
}
