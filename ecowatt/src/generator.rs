//! Synthetic energy consumption generator
//!
//! A series is composed additively from a base load, a yearly sine, a weekly
//! sine, Gaussian noise and a linear trend, then clamped at zero:
//!
//! ```text
//! value(i) = base + seasonal * sin(2*pi*i/365) + weekly * sin(2*pi*i/7)
//!          + noise(i) + trend * i
//! ```

use crate::error::{EcoWattError, Result};
use crate::series::{Frequency, Observation, Series};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Length of the yearly cycle in steps
pub const YEARLY_PERIOD: f64 = 365.0;
/// Length of the weekly cycle in steps
pub const WEEKLY_PERIOD: f64 = 7.0;
/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Constants of the additive composition model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalProfile {
    /// Base consumption (kWh)
    pub base: f64,
    /// Amplitude of the yearly cycle
    pub seasonal_amplitude: f64,
    /// Amplitude of the weekly cycle
    pub weekly_amplitude: f64,
    /// Linear growth per step
    pub trend_rate: f64,
    /// Standard deviation of the Gaussian noise
    pub noise_std: f64,
    /// Seed of the noise source
    pub seed: u64,
}

impl Default for SeasonalProfile {
    fn default() -> Self {
        Self {
            base: 100.0,
            seasonal_amplitude: 20.0,
            weekly_amplitude: 10.0,
            trend_rate: 0.01,
            noise_std: 5.0,
            seed: DEFAULT_SEED,
        }
    }
}

impl SeasonalProfile {
    /// A noise-free, trend-free profile that stays at `base`
    pub fn flat(base: f64) -> Self {
        Self {
            base,
            seasonal_amplitude: 0.0,
            weekly_amplitude: 0.0,
            trend_rate: 0.0,
            noise_std: 0.0,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the noise seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Generator of synthetic consumption series
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    profile: SeasonalProfile,
    noise: Normal<f64>,
}

impl SignalGenerator {
    /// Create a generator, validating the profile constants
    pub fn new(profile: SeasonalProfile) -> Result<Self> {
        let constants = [
            ("base", profile.base),
            ("seasonal_amplitude", profile.seasonal_amplitude),
            ("weekly_amplitude", profile.weekly_amplitude),
            ("trend_rate", profile.trend_rate),
        ];
        if let Some((name, value)) = constants.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EcoWattError::InvalidArgument(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }

        if !profile.noise_std.is_finite() || profile.noise_std < 0.0 {
            return Err(EcoWattError::InvalidArgument(format!(
                "noise_std must be finite and non-negative, got {}",
                profile.noise_std
            )));
        }

        let noise = Normal::new(0.0, profile.noise_std)
            .map_err(|e| EcoWattError::InvalidArgument(format!("noise distribution: {}", e)))?;

        Ok(Self { profile, noise })
    }

    /// Get the composition constants
    pub fn profile(&self) -> &SeasonalProfile {
        &self.profile
    }

    /// Generate `period_count` values without timestamps.
    ///
    /// The noise source is re-seeded on every call, so equal arguments give
    /// identical output.
    pub fn generate_values(&self, period_count: usize) -> Result<Vec<f64>> {
        if period_count == 0 {
            return Err(EcoWattError::InvalidArgument(
                "period_count must be positive".to_string(),
            ));
        }

        let p = &self.profile;
        let mut rng = StdRng::seed_from_u64(p.seed);

        let values = (0..period_count)
            .map(|i| {
                let t = i as f64;
                let seasonal = p.seasonal_amplitude * (2.0 * PI * t / YEARLY_PERIOD).sin();
                let weekly = p.weekly_amplitude * (2.0 * PI * t / WEEKLY_PERIOD).sin();
                let noise = self.noise.sample(&mut rng);
                let trend = p.trend_rate * t;
                (p.base + seasonal + weekly + noise + trend).max(0.0)
            })
            .collect();

        Ok(values)
    }

    /// Generate a series of `period_count` points, one per `frequency` step from `start_date`
    pub fn generate(
        &self,
        start_date: NaiveDate,
        period_count: usize,
        frequency: Frequency,
    ) -> Result<Series> {
        let values = self.generate_values(period_count)?;
        let start = start_date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| EcoWattError::InvalidArgument(format!("bad start date {}", start_date)))?;

        let step = frequency.step();
        let mut timestamp = start;
        let mut observations = Vec::with_capacity(values.len());
        for value in values {
            observations.push(Observation::new(timestamp, value));
            timestamp += step;
        }

        debug!(
            periods = period_count,
            %frequency,
            seed = self.profile.seed,
            "generated synthetic series"
        );

        Series::new(observations)
    }
}

/// Generate a series with the default composition constants
pub fn generate(start_date: NaiveDate, period_count: usize, frequency: Frequency) -> Result<Series> {
    SignalGenerator::new(SeasonalProfile::default())?.generate(start_date, period_count, frequency)
}
