//! A single sample on a series grid.

use serde::{Deserialize, Serialize};

use super::TimeLabel;

/// One point of a [`TimeSeries`](super::TimeSeries).
///
/// Points at or before the now marker carry `actual`; points at or after it
/// carry `predicted` with its band. The now point carries both, with the same
/// value, and is where the two regimes are stitched together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub time: TimeLabel,
    /// Observed value (at or before now)
    #[serde(default)]
    pub actual: Option<f64>,
    /// Forecast value (at or after now)
    #[serde(default)]
    pub predicted: Option<f64>,
    /// Upper confidence bound around `predicted`
    #[serde(default)]
    pub upper: Option<f64>,
    /// Lower confidence bound around `predicted`, never negative
    #[serde(default)]
    pub lower: Option<f64>,
    /// True on the single observation boundary point
    #[serde(default)]
    pub now: bool,
    /// Set by the cutoff generator: this hour is at or past the carrier cutoff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff: Option<bool>,
    /// Target annotation for renderers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

impl TimePoint {
    /// A point in the observed segment.
    pub fn observed(time: TimeLabel, actual: f64) -> Self {
        Self {
            time,
            actual: Some(actual),
            predicted: None,
            upper: None,
            lower: None,
            now: false,
            cutoff: None,
            target: None,
        }
    }

    /// The now point: actual and predicted hold the same value and the band
    /// has zero width.
    pub fn stitch(time: TimeLabel, value: f64) -> Self {
        Self {
            time,
            actual: Some(value),
            predicted: Some(value),
            upper: Some(value),
            lower: Some(value),
            now: true,
            cutoff: None,
            target: None,
        }
    }

    /// A point in the forecast segment.
    pub fn forecast(time: TimeLabel, predicted: f64, upper: f64, lower: f64) -> Self {
        Self {
            time,
            actual: None,
            predicted: Some(predicted),
            upper: Some(upper),
            lower: Some(lower),
            now: false,
            cutoff: None,
            target: None,
        }
    }

    pub fn with_cutoff(mut self, past_cutoff: bool) -> Self {
        self.cutoff = Some(past_cutoff);
        self
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// The value a reader should show for this point: `actual` if present,
    /// otherwise `predicted`.
    pub fn observed_value(&self) -> Option<f64> {
        self.actual.or(self.predicted)
    }

    /// The wider half of the confidence band around `predicted`.
    ///
    /// `None` for points without a prediction; zero at the now point.
    pub fn band_spread(&self) -> Option<f64> {
        let predicted = self.predicted?;
        let above = self.upper.map_or(0.0, |upper| upper - predicted);
        let below = self.lower.map_or(0.0, |lower| predicted - lower);
        Some(above.max(below))
    }

    pub fn is_forecast(&self) -> bool {
        self.actual.is_none() && self.predicted.is_some()
    }

    pub fn is_past_cutoff(&self) -> bool {
        self.cutoff.unwrap_or(false)
    }
}
