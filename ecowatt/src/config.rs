//! Layered configuration: built-in defaults, then a TOML file, then
//! `ECOWATT__`-prefixed environment variables (`__` separates sections,
//! e.g. `ECOWATT__MODEL__LAG=14`).

use crate::error::{EcoWattError, Result};
use crate::features::DEFAULT_LAG;
use crate::generator::SeasonalProfile;
use crate::model::FitOptions;
use crate::series::Frequency;
use chrono::NaiveDate;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "ecowatt.toml";
/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "ECOWATT__";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EcoWattConfig {
    pub generator: GeneratorConfig,
    pub model: ModelConfig,
    pub forecast: ForecastConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub start_date: NaiveDate,
    pub periods: usize,
    pub frequency: Frequency,
    pub profile: SeasonalProfile,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            periods: 365 * 2,
            frequency: Frequency::Daily,
            profile: SeasonalProfile::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub lag: usize,
    pub reject_rank_deficient: bool,
    pub train_ratio: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            lag: DEFAULT_LAG,
            reject_rank_deficient: false,
            train_ratio: crate::metrics::DEFAULT_TRAIN_RATIO,
        }
    }
}

impl ModelConfig {
    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            reject_rank_deficient: self.reject_rank_deficient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub horizon: usize,
    pub frequency: Frequency,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 30,
            frequency: Frequency::Daily,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub forecast_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("energy_data.csv"),
            model_path: PathBuf::from("energy_model.json"),
            forecast_path: PathBuf::from("energy_forecast.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

impl EcoWattConfig {
    /// Load from [`DEFAULT_CONFIG_FILE`] (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load from `path` (if present) and the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no operation could use
    pub fn validate(&self) -> Result<()> {
        if self.generator.periods == 0 {
            return Err(EcoWattError::Config("generator.periods must be positive".to_string()));
        }
        if self.model.lag == 0 {
            return Err(EcoWattError::Config("model.lag must be positive".to_string()));
        }
        if !(self.model.train_ratio > 0.0 && self.model.train_ratio < 1.0) {
            return Err(EcoWattError::Config(
                "model.train_ratio must be between 0 and 1".to_string(),
            ));
        }
        if self.forecast.horizon == 0 {
            return Err(EcoWattError::Config("forecast.horizon must be positive".to_string()));
        }
        Ok(())
    }
}
