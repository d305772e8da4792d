//! Carrier burnup toward a target before a cutoff hour.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{band, require_finite, require_non_negative};
use crate::error::GeneratorError;
use crate::grid::HorizonGrid;
use crate::series::{TimePoint, TimeSeries};

/// Business inputs for a carrier cutoff series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutoffParams {
    /// Units the carrier must have processed by cutoff
    pub target: f64,
    /// Units processed so far
    pub current: f64,
    /// Observed processing rate, units per hour
    pub velocity: f64,
    /// Hour of day (0-23) the truck leaves
    pub cutoff_hour: u32,
}

/// Tunable constants of the burnup model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffModel {
    /// Cap on projected progress toward target
    #[serde(default = "default_progress_cap")]
    pub progress_cap: f64,
    /// Cap on the displayed value, as a multiple of target
    #[serde(default = "default_overshoot_cap")]
    pub overshoot_cap: f64,
    /// Band half-width per step past now, as a fraction of target
    #[serde(default = "default_band_fraction")]
    pub band_fraction: f64,
    /// Cap on the upper bound, as a multiple of target
    #[serde(default = "default_upper_cap")]
    pub upper_cap: f64,
}

fn default_progress_cap() -> f64 {
    1.0
}
fn default_overshoot_cap() -> f64 {
    1.1
}
fn default_band_fraction() -> f64 {
    0.03
}
fn default_upper_cap() -> f64 {
    1.15
}

impl Default for CutoffModel {
    fn default() -> Self {
        Self {
            progress_cap: default_progress_cap(),
            overshoot_cap: default_overshoot_cap(),
            band_fraction: default_band_fraction(),
            upper_cap: default_upper_cap(),
        }
    }
}

impl CutoffParams {
    pub fn new(target: f64, current: f64, velocity: f64, cutoff_hour: u32) -> Self {
        Self {
            target,
            current,
            velocity,
            cutoff_hour,
        }
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        require_finite("target", self.target)?;
        if self.target <= 0.0 {
            return Err(GeneratorError::invalid(
                "target",
                format!("must be positive, got {}", self.target),
            ));
        }
        require_non_negative("current", self.current)?;
        require_non_negative("velocity", self.velocity)?;
        if self.cutoff_hour > 23 {
            return Err(GeneratorError::invalid(
                "cutoff_hour",
                format!("must be an hour of day (0-23), got {}", self.cutoff_hour),
            ));
        }
        Ok(())
    }

    /// Lay the burnup over `grid`.
    ///
    /// History back-fills a straight line from 0 to `current`; the forecast
    /// adds `velocity` per wall-clock hour past now. Every point is tagged
    /// with the target and whether its hour is at or past the cutoff.
    pub fn series_on(
        &self,
        grid: &HorizonGrid,
        model: &CutoffModel,
    ) -> Result<TimeSeries, GeneratorError> {
        self.validate()?;

        if !grid.labels().iter().any(|l| l.hour() >= self.cutoff_hour) {
            warn!(
                cutoff_hour = self.cutoff_hour,
                last = %grid.labels()[grid.len() - 1],
                "cutoff hour lies beyond the grid; no point will be flagged"
            );
        }

        let now = grid.now_index();
        let base_progress = self.current / self.target;
        let rate = self.velocity / self.target;
        let upper_cap = self.target * model.upper_cap;

        let mut points = Vec::with_capacity(grid.len());
        for (i, time) in grid.iter() {
            let point = match i.cmp(&now) {
                Ordering::Less => {
                    TimePoint::observed(time, (self.current * grid.history_fraction(i)).round())
                }
                Ordering::Equal => TimePoint::stitch(time, self.current),
                Ordering::Greater => {
                    let progress =
                        (base_progress + grid.hours_past_now(i) * rate).min(model.progress_cap);
                    let value = (self.target * progress.min(model.overshoot_cap)).round();
                    let half_width =
                        grid.steps_past_now(i) as f64 * self.target * model.band_fraction;
                    let (upper, lower) = band(value, half_width);
                    TimePoint::forecast(time, value, upper.min(upper_cap).max(value), lower)
                }
            };
            points.push(
                point
                    .with_cutoff(time.hour() >= self.cutoff_hour)
                    .with_target(self.target),
            );
        }

        let series = TimeSeries::new(points)?;
        debug!(
            kind = "cutoff",
            target = self.target,
            cutoff_hour = self.cutoff_hour,
            horizon_end = series.horizon_end_value(),
            "generated series"
        );
        Ok(series)
    }
}
