//! Horizon grids shared by every generator.
//!
//! A grid fixes the labels of a series and which of them is "now". Rather
//! than each generator re-deriving the layout, they all build their grid
//! from one [`HorizonConfig`]: the rolling window (centred on now) for the
//! ramp generator and the shift window for cutoff and burndown series.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::series::TimeLabel;

/// Grid layout shared by all generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonConfig {
    /// Label of the first grid point
    #[serde(default = "default_start")]
    pub start: TimeLabel,
    /// Minutes between grid points
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
    /// Index of the now marker, counted from `start`
    #[serde(default = "default_now_index")]
    pub now_index: usize,
    /// Points in the rolling window (ramp series)
    #[serde(default = "default_window_points")]
    pub window_points: usize,
    /// Points in the shift window (cutoff and burndown series)
    #[serde(default = "default_shift_points")]
    pub shift_points: usize,
}

fn default_start() -> TimeLabel {
    TimeLabel::from_hm(6, 0).unwrap_or_default()
}
fn default_step_minutes() -> u32 {
    60
}
fn default_now_index() -> usize {
    4
}
fn default_window_points() -> usize {
    9
}
fn default_shift_points() -> usize {
    11
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            step_minutes: default_step_minutes(),
            now_index: default_now_index(),
            window_points: default_window_points(),
            shift_points: default_shift_points(),
        }
    }
}

impl HorizonConfig {
    /// The rolling window: 06:00-14:00 hourly with now at 10:00 by default.
    pub fn window_grid(&self) -> Result<HorizonGrid, GridError> {
        HorizonGrid::regular(self.start, self.step_minutes, self.window_points, self.now_index)
    }

    /// The shift window: 06:00-16:00 hourly with now at 10:00 by default.
    pub fn shift_grid(&self) -> Result<HorizonGrid, GridError> {
        HorizonGrid::regular(self.start, self.step_minutes, self.shift_points, self.now_index)
    }
}

/// A concrete, validated list of grid labels with a now marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizonGrid {
    labels: Vec<TimeLabel>,
    now_index: usize,
}

impl HorizonGrid {
    /// Evenly spaced grid of `points` labels starting at `start`.
    pub fn regular(
        start: TimeLabel,
        step_minutes: u32,
        points: usize,
        now_index: usize,
    ) -> Result<Self, GridError> {
        if step_minutes == 0 {
            return Err(GridError::ZeroStep);
        }
        // Last second of the day any label can land on
        let seconds_left = 86_399 - u64::from(start.seconds_from_midnight());
        let max_points = seconds_left / (u64::from(step_minutes) * 60) + 1;
        if points as u64 > max_points {
            return Err(GridError::PastMidnight { start });
        }
        let mut labels = Vec::with_capacity(points);
        let mut current = start;
        for i in 0..points {
            if i > 0 {
                current = current
                    .checked_add_minutes(step_minutes)
                    .ok_or(GridError::PastMidnight { start })?;
            }
            labels.push(current);
        }
        Self::from_labels(labels, now_index)
    }

    /// Grid from explicit labels, e.g. hourly with an irregular tail.
    pub fn from_labels(labels: Vec<TimeLabel>, now_index: usize) -> Result<Self, GridError> {
        if labels.len() < 2 {
            return Err(GridError::TooFewPoints(labels.len()));
        }
        if now_index + 1 >= labels.len() {
            return Err(GridError::NoHorizon {
                now_index,
                points: labels.len(),
            });
        }
        if let Some(pair) = labels.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(GridError::NonMonotonic {
                previous: pair[0],
                current: pair[1],
            });
        }
        Ok(Self { labels, now_index })
    }

    pub fn labels(&self) -> &[TimeLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn now_index(&self) -> usize {
        self.now_index
    }

    pub fn now_label(&self) -> TimeLabel {
        self.labels[self.now_index]
    }

    /// Position of `index` through the whole grid, 0.0 at the first point
    /// and 1.0 at the last.
    pub fn progress(&self, index: usize) -> f64 {
        index as f64 / (self.labels.len() - 1) as f64
    }

    /// Position of `index` through the observed segment, 0.0 at the first
    /// point and 1.0 at now. A grid whose first point is now reports 1.0.
    pub fn history_fraction(&self, index: usize) -> f64 {
        if self.now_index == 0 {
            1.0
        } else {
            index as f64 / self.now_index as f64
        }
    }

    /// Number of grid steps between now and `index`; zero at or before now.
    pub fn steps_past_now(&self, index: usize) -> usize {
        index.saturating_sub(self.now_index)
    }

    /// Wall-clock hours between now and `index`; zero at or before now.
    pub fn hours_past_now(&self, index: usize) -> f64 {
        if index <= self.now_index {
            return 0.0;
        }
        self.now_label().seconds_until(self.labels[index]) as f64 / 3600.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, TimeLabel)> + '_ {
        self.labels.iter().copied().enumerate()
    }
}
