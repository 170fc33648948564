//! # EcoWatt
//!
//! Energy consumption forecasting with lag-feature linear regression.
//!
//! ## Features
//!
//! - Synthetic consumption series (yearly + weekly seasonality, trend, seeded noise)
//! - Lag feature construction with a single lag-order convention ([`LagWindow`])
//! - Least squares lag regression ([`LagRegression`])
//! - Recursive multi-step forecasting
//! - CSV ingestion/export, JSON model storage and holdout evaluation
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ecowatt::features::{build_features, DEFAULT_LAG};
//! use ecowatt::generator::{SeasonalProfile, SignalGenerator};
//! use ecowatt::predictor::forecast_series;
//! use ecowatt::{Frequency, LagRegression};
//!
//! # fn main() -> ecowatt::Result<()> {
//! let generator = SignalGenerator::new(SeasonalProfile::default())?;
//! let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//! let series = generator.generate(start, 730, Frequency::Daily)?;
//!
//! let (features, targets) = build_features(&series, DEFAULT_LAG)?;
//! let model = LagRegression::fit(&features, &targets)?;
//!
//! let forecast = forecast_series(&model, &series, 30, Frequency::Daily)?;
//! assert_eq!(forecast.horizon(), 30);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod generator;
pub mod metrics;
pub mod model;
pub mod persistence;
pub mod predictor;
pub mod series;
pub mod session;
pub mod telemetry;

// Re-export commonly used types
pub use crate::config::EcoWattConfig;
pub use crate::data::DataLoader;
pub use crate::error::{EcoWattError, Result};
pub use crate::features::{FeatureMatrix, LagWindow, TargetVector};
pub use crate::model::{FitOptions, LagRegression};
pub use crate::persistence::ModelStore;
pub use crate::predictor::{Forecast, ForecastPoint};
pub use crate::series::{Frequency, Observation, Series};
pub use crate::session::{ForecastOutcome, Session};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
