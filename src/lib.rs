//! # EcoWatt workspace
//!
//! Umbrella crate re-exporting the EcoWatt forecasting library and its
//! numeric kernels.
//!
//! ## Example
//!
//! ```
//! use ecowatt_workspace::ecowatt::features::build_features_from_values;
//! use ecowatt_workspace::ecowatt::LagRegression;
//!
//! let values = vec![100.0; 14];
//! let (features, targets) = build_features_from_values(&values, 7).unwrap();
//! let model = LagRegression::fit(&features, &targets).unwrap();
//! assert!((model.predict_row(&[100.0; 7]).unwrap() - 100.0).abs() < 1e-9);
//! ```

pub use ecowatt;
pub use forecast_math;
