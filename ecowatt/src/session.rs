//! Explicit session state
//!
//! A [`Session`] owns at most one series, one model and one forecast. Loading
//! or generating data replaces the series and drops the forecast; training
//! replaces the model and drops the forecast; forecasting replaces the
//! forecast. Nothing outlives the session unless it is saved explicitly.

use crate::config::EcoWattConfig;
use crate::data::DataLoader;
use crate::error::{EcoWattError, Result};
use crate::features::build_features;
use crate::generator::SignalGenerator;
use crate::model::LagRegression;
use crate::persistence::ModelStore;
use crate::predictor::{forecast_series, Forecast};
use crate::series::{Series, SeriesSummary};
use std::path::Path;
use tracing::info;

/// Result of asking a session for a forecast
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    /// A forecast was produced
    Ready(Forecast),
    /// No model has been trained or loaded yet
    ModelMissing,
}

impl ForecastOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ForecastOutcome::Ready(_))
    }

    /// The forecast, if one was produced
    pub fn ready(self) -> Option<Forecast> {
        match self {
            ForecastOutcome::Ready(forecast) => Some(forecast),
            ForecastOutcome::ModelMissing => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    config: EcoWattConfig,
    series: Option<Series>,
    model: Option<LagRegression>,
    forecast: Option<Forecast>,
}

impl Session {
    /// Empty session: no series, no model
    pub fn new(config: EcoWattConfig) -> Self {
        Self {
            config,
            series: None,
            model: None,
            forecast: None,
        }
    }

    /// Session that starts with whatever model `store` holds, if any
    pub fn start(config: EcoWattConfig, store: &ModelStore) -> Result<Self> {
        let mut session = Self::new(config);
        session.model = store.load()?;
        info!(model_loaded = session.model.is_some(), "session started");
        Ok(session)
    }

    pub fn config(&self) -> &EcoWattConfig {
        &self.config
    }

    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    pub fn model(&self) -> Option<&LagRegression> {
        self.model.as_ref()
    }

    pub fn last_forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    /// Summary of the current series
    pub fn summary(&self) -> Option<SeriesSummary> {
        self.series.as_ref().and_then(Series::summary)
    }

    /// Generate a synthetic series from the generator configuration
    pub fn generate(&mut self) -> Result<&Series> {
        let cfg = &self.config.generator;
        let series = SignalGenerator::new(cfg.profile.clone())?.generate(
            cfg.start_date,
            cfg.periods,
            cfg.frequency,
        )?;
        Ok(self.ingest(series))
    }

    /// Load the series from a CSV file
    pub fn load_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<&Series> {
        let series = DataLoader::from_csv(path)?;
        Ok(self.ingest(series))
    }

    /// Replace the current series
    pub fn ingest(&mut self, series: Series) -> &Series {
        info!(points = series.len(), "series replaced");
        self.forecast = None;
        self.series.insert(series)
    }

    /// Fit a new model on the current series, replacing any previous one
    pub fn train(&mut self) -> Result<&LagRegression> {
        let series = self.series.as_ref().ok_or(EcoWattError::MissingSeries)?;
        let (features, targets) = build_features(series, self.config.model.lag)?;
        let model =
            LagRegression::fit_with(&features, &targets, self.config.model.fit_options())?;

        self.forecast = None;
        Ok(self.model.insert(model))
    }

    /// Replace the current model, e.g. with one loaded elsewhere
    pub fn install_model(&mut self, model: LagRegression) {
        self.forecast = None;
        self.model = Some(model);
    }

    /// Persist the current model; `Ok(false)` when there is none to save
    pub fn save_model(&self, store: &ModelStore) -> Result<bool> {
        match &self.model {
            Some(model) => {
                store.save(model)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Forecast `horizon` steps past the end of the current series
    pub fn forecast(&mut self, horizon: usize) -> Result<ForecastOutcome> {
        let Some(model) = self.model.as_ref() else {
            return Ok(ForecastOutcome::ModelMissing);
        };
        let series = self.series.as_ref().ok_or(EcoWattError::MissingSeries)?;

        let forecast = forecast_series(model, series, horizon, self.config.forecast.frequency)?;
        info!(horizon, "forecast ready");

        self.forecast = Some(forecast.clone());
        Ok(ForecastOutcome::Ready(forecast))
    }
}
