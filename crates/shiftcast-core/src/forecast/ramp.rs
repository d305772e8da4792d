//! Generic ramp trajectories (throughput, staffing, zone capacity).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::noise::NoiseSource;
use super::{band, require_finite, require_non_negative};
use crate::error::GeneratorError;
use crate::grid::HorizonGrid;
use crate::series::{TimePoint, TimeSeries};

/// Business inputs for a ramp series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampParams {
    /// Value at the first grid point
    pub base_actual: f64,
    /// Value at the last grid point, before trend
    pub base_predicted: f64,
    /// Band width driver, 0.0-1.0
    pub variance: f64,
    /// Additive drift, applied in proportion to progress through the grid
    #[serde(default)]
    pub trend: f64,
}

/// Tunable constants of the ramp model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampModel {
    /// Jitter amplitude as a fraction of `base_actual`
    #[serde(default = "default_jitter_fraction")]
    pub jitter_fraction: f64,
    /// Band half-width per step past now, as a fraction of `base_actual * variance`
    #[serde(default = "default_band_factor")]
    pub band_factor: f64,
}

fn default_jitter_fraction() -> f64 {
    0.025
}
fn default_band_factor() -> f64 {
    0.15
}

impl Default for RampModel {
    fn default() -> Self {
        Self {
            jitter_fraction: default_jitter_fraction(),
            band_factor: default_band_factor(),
        }
    }
}

impl RampParams {
    pub fn new(base_actual: f64, base_predicted: f64, variance: f64, trend: f64) -> Self {
        Self {
            base_actual,
            base_predicted,
            variance,
            trend,
        }
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        require_non_negative("base_actual", self.base_actual)?;
        require_non_negative("base_predicted", self.base_predicted)?;
        require_finite("trend", self.trend)?;
        require_finite("variance", self.variance)?;
        if !(0.0..=1.0).contains(&self.variance) {
            return Err(GeneratorError::invalid(
                "variance",
                format!("must be between 0 and 1, got {}", self.variance),
            ));
        }
        Ok(())
    }

    /// Lay the ramp over `grid`, drawing one jitter sample per point.
    ///
    /// Values are linear from `base_actual` to `base_predicted` plus
    /// `trend`, jittered by up to `jitter_fraction * base_actual`, rounded
    /// and floored at zero. The band vanishes at now and widens by a fixed
    /// amount per step after it.
    pub fn series_on<N>(
        &self,
        grid: &HorizonGrid,
        model: &RampModel,
        noise: &mut N,
    ) -> Result<TimeSeries, GeneratorError>
    where
        N: NoiseSource + ?Sized,
    {
        self.validate()?;

        let now = grid.now_index();
        let jitter_scale = self.base_actual * model.jitter_fraction;
        let band_step = self.base_actual * self.variance * model.band_factor;

        let mut points = Vec::with_capacity(grid.len());
        for (i, time) in grid.iter() {
            let progress = grid.progress(i);
            let base = self.base_actual
                + (self.base_predicted - self.base_actual) * progress
                + self.trend * progress;
            let value = (base + noise.next_unit() * jitter_scale).round().max(0.0);

            let point = match i.cmp(&now) {
                Ordering::Less => TimePoint::observed(time, value),
                Ordering::Equal => TimePoint::stitch(time, value),
                Ordering::Greater => {
                    let (upper, lower) = band(value, grid.steps_past_now(i) as f64 * band_step);
                    TimePoint::forecast(time, value, upper, lower)
                }
            };
            points.push(point);
        }

        let series = TimeSeries::new(points)?;
        debug!(
            kind = "ramp",
            points = series.len(),
            now = %series.now_label(),
            now_value = series.now_value(),
            "generated series"
        );
        Ok(series)
    }
}
