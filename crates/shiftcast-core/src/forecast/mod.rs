//! Trajectory generators.
//!
//! Each generator turns a handful of business parameters into a fully
//! populated [`TimeSeries`]:
//!
//! - **Ramp**: generic linear trajectory with jitter (throughput, staffing)
//! - **Cutoff**: burnup toward a carrier's target before its truck leaves
//! - **Burndown**: depletion of a fixed work queue
//!
//! Grids come from a shared [`HorizonConfig`]; model constants come from
//! [`ModelConfig`]. Only the ramp consumes noise, and always through an
//! injected [`NoiseSource`].

mod burndown;
mod cutoff;
pub mod noise;
mod ramp;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::GeneratorError;
use crate::grid::HorizonConfig;
use crate::series::TimeSeries;

pub use burndown::{BurndownModel, BurndownParams};
pub use cutoff::{CutoffModel, CutoffParams};
pub use noise::{Constant, NoiseConfig, NoiseSource, SeededNoise, Silent};
pub use ramp::{RampModel, RampParams};

/// Model constants for all generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub ramp: RampModel,
    #[serde(default)]
    pub cutoff: CutoffModel,
    #[serde(default)]
    pub burndown: BurndownModel,
}

/// Generates series on the configured grids with the configured constants.
#[derive(Debug, Clone, Default)]
pub struct SeriesGenerator {
    horizon: HorizonConfig,
    model: ModelConfig,
}

impl SeriesGenerator {
    /// Generator with the default grids and model constants.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(horizon: HorizonConfig, model: ModelConfig) -> Self {
        Self { horizon, model }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_settings(config.horizon.clone(), config.model.clone())
    }

    pub fn horizon(&self) -> &HorizonConfig {
        &self.horizon
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Ramp series on the rolling window.
    pub fn ramp<N>(&self, params: &RampParams, noise: &mut N) -> Result<TimeSeries, GeneratorError>
    where
        N: NoiseSource + ?Sized,
    {
        let grid = self.horizon.window_grid()?;
        params.series_on(&grid, &self.model.ramp, noise)
    }

    /// Cutoff series on the shift window.
    pub fn cutoff(&self, params: &CutoffParams) -> Result<TimeSeries, GeneratorError> {
        let grid = self.horizon.shift_grid()?;
        params.series_on(&grid, &self.model.cutoff)
    }

    /// Burndown series on the shift window.
    pub fn burndown(&self, params: &BurndownParams) -> Result<TimeSeries, GeneratorError> {
        let grid = self.horizon.shift_grid()?;
        params.series_on(&grid, &self.model.burndown)
    }
}

/// Ramp series with default settings and entropy-seeded jitter.
pub fn generate_ramp_series(
    base_actual: f64,
    base_predicted: f64,
    variance: f64,
    trend: f64,
) -> Result<TimeSeries, GeneratorError> {
    SeriesGenerator::new().ramp(
        &RampParams::new(base_actual, base_predicted, variance, trend),
        &mut SeededNoise::from_entropy(),
    )
}

/// Cutoff series with default settings.
pub fn generate_cutoff_series(
    target: f64,
    current: f64,
    velocity: f64,
    cutoff_hour: u32,
) -> Result<TimeSeries, GeneratorError> {
    SeriesGenerator::new().cutoff(&CutoffParams::new(target, current, velocity, cutoff_hour))
}

/// Burndown series with default settings.
pub fn generate_burndown_series(
    total: f64,
    done: f64,
    velocity: f64,
) -> Result<TimeSeries, GeneratorError> {
    SeriesGenerator::new().burndown(&BurndownParams::new(total, done, velocity))
}

/// `(upper, lower)` around `value`, with the lower bound floored at zero.
fn band(value: f64, half_width: f64) -> (f64, f64) {
    (value + half_width, (value - half_width).max(0.0))
}

fn require_finite(field: &'static str, value: f64) -> Result<(), GeneratorError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeneratorError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), GeneratorError> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(GeneratorError::invalid(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}
