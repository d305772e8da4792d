//! Work-queue depletion.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{band, require_non_negative};
use crate::error::GeneratorError;
use crate::grid::HorizonGrid;
use crate::series::{TimePoint, TimeSeries};

/// Business inputs for a burndown series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurndownParams {
    /// Work items queued at shift start
    pub total: f64,
    /// Items completed so far
    pub done: f64,
    /// Items completed per hour
    pub velocity: f64,
}

/// Tunable constants of the burndown model.
///
/// The band grows by a flat amount per step regardless of queue size,
/// unlike the proportional bands of the ramp and cutoff models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownModel {
    /// Band half-width added per step past now, in items
    #[serde(default = "default_band_step")]
    pub band_step: f64,
}

fn default_band_step() -> f64 {
    40.0
}

impl Default for BurndownModel {
    fn default() -> Self {
        Self {
            band_step: default_band_step(),
        }
    }
}

impl BurndownParams {
    pub fn new(total: f64, done: f64, velocity: f64) -> Self {
        Self {
            total,
            done,
            velocity,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.total - self.done
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        require_non_negative("total", self.total)?;
        require_non_negative("done", self.done)?;
        require_non_negative("velocity", self.velocity)?;
        if self.done > self.total {
            return Err(GeneratorError::invalid(
                "done",
                format!("{} completed exceeds {} total", self.done, self.total),
            ));
        }
        Ok(())
    }

    pub fn series_on(
        &self,
        grid: &HorizonGrid,
        model: &BurndownModel,
    ) -> Result<TimeSeries, GeneratorError> {
        self.validate()?;

        let now = grid.now_index();
        let remaining = self.remaining();

        let mut points = Vec::with_capacity(grid.len());
        for (i, time) in grid.iter() {
            let point = match i.cmp(&now) {
                Ordering::Less => TimePoint::observed(
                    time,
                    (self.total - self.done * grid.history_fraction(i)).round(),
                ),
                Ordering::Equal => TimePoint::stitch(time, remaining),
                Ordering::Greater => {
                    let value = (remaining - grid.hours_past_now(i) * self.velocity).max(0.0);
                    let half_width = grid.steps_past_now(i) as f64 * model.band_step;
                    let (upper, lower) = band(value, half_width);
                    TimePoint::forecast(time, value, upper, lower)
                }
            };
            points.push(point);
        }

        let series = TimeSeries::new(points)?;
        debug!(
            kind = "burndown",
            remaining,
            horizon_end = series.horizon_end_value(),
            "generated series"
        );
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::HorizonConfig;

    fn shift() -> HorizonGrid {
        HorizonConfig::default().shift_grid().unwrap()
    }

    #[test]
    fn history_drains_from_total_to_remaining() {
        let series = BurndownParams::new(4000.0, 2000.0, 500.0)
            .series_on(&shift(), &BurndownModel::default())
            .unwrap();
        let history: Vec<f64> = series.history().iter().filter_map(|p| p.actual).collect();
        assert_eq!(history, vec![4000.0, 3500.0, 3000.0, 2500.0, 2000.0]);
    }

    #[test]
    fn forecast_floors_at_zero() {
        let series = BurndownParams::new(4200.0, 1890.0, 520.0)
            .series_on(&shift(), &BurndownModel::default())
            .unwrap();
        let forecast: Vec<f64> = series.forecast().iter().filter_map(|p| p.predicted).collect();
        assert_eq!(forecast, vec![1790.0, 1270.0, 750.0, 230.0, 0.0, 0.0]);
    }

    #[test]
    fn band_is_flat_per_step() {
        let small = BurndownParams::new(100.0, 10.0, 1.0)
            .series_on(&shift(), &BurndownModel::default())
            .unwrap();
        let large = BurndownParams::new(100_000.0, 10.0, 1.0)
            .series_on(&shift(), &BurndownModel::default())
            .unwrap();
        let spreads = |s: &TimeSeries| -> Vec<f64> {
            s.forecast().iter().map(|p| p.band_spread().unwrap()).collect()
        };
        assert_eq!(spreads(&small), spreads(&large));
        assert_eq!(spreads(&small)[0], 40.0);
    }

    #[test]
    fn band_step_is_configurable() {
        let model = BurndownModel { band_step: 10.0 };
        let series = BurndownParams::new(1000.0, 0.0, 100.0)
            .series_on(&shift(), &model)
            .unwrap();
        assert_eq!(series.forecast()[2].band_spread(), Some(30.0));
    }

    #[test]
    fn rejects_overdone_queue() {
        let err = BurndownParams::new(100.0, 150.0, 10.0)
            .series_on(&shift(), &BurndownModel::default())
            .unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }
}
