//! Time series model shared by every generator and reader.
//!
//! A [`TimeSeries`] is a validated, strictly ordered run of [`TimePoint`]s
//! split by a single now marker into an observed segment and a forecast
//! segment. Construction is the only place the structural invariants are
//! checked; every other part of the crate relies on them.

mod label;
mod point;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

pub use label::TimeLabel;
pub use point::TimePoint;

/// A validated series of time points.
///
/// Serializes as a plain list of points; deserializing runs the same
/// validation as [`TimeSeries::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimePoint>", into = "Vec<TimePoint>")]
pub struct TimeSeries {
    points: Vec<TimePoint>,
    now_index: usize,
    /// Observed value per point, cached at validation time
    observed: Vec<f64>,
}

impl TimeSeries {
    /// Validate `points` and build a series.
    ///
    /// # Errors
    ///
    /// Returns a [`SeriesError`] describing the first violated invariant:
    /// empty input, non-increasing labels, zero or several now points,
    /// misplaced actual/predicted values, a now point whose two values
    /// disagree, an inverted band, a negative lower bound or a non-finite
    /// number.
    pub fn new(points: Vec<TimePoint>) -> Result<Self, SeriesError> {
        let (now_index, observed) = validate(&points)?;
        Ok(Self {
            points,
            now_index,
            observed,
        })
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: an empty series fails validation.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn now_index(&self) -> usize {
        self.now_index
    }

    pub fn now_point(&self) -> &TimePoint {
        &self.points[self.now_index]
    }

    pub fn now_label(&self) -> TimeLabel {
        self.points[self.now_index].time
    }

    /// The stitched value at the now marker.
    pub fn now_value(&self) -> f64 {
        self.observed[self.now_index]
    }

    pub fn first_label(&self) -> TimeLabel {
        self.points[0].time
    }

    pub fn last_label(&self) -> TimeLabel {
        self.points[self.points.len() - 1].time
    }

    /// Observed value at the last grid point.
    pub fn horizon_end_value(&self) -> f64 {
        self.observed[self.observed.len() - 1]
    }

    /// Observed value of every point, in grid order.
    pub fn observed_values(&self) -> &[f64] {
        &self.observed
    }

    /// Points up to and including now.
    pub fn history(&self) -> &[TimePoint] {
        &self.points[..=self.now_index]
    }

    /// Points strictly after now.
    pub fn forecast(&self) -> &[TimePoint] {
        &self.points[self.now_index + 1..]
    }

    /// Index of the point labelled exactly `time`, or the index where it
    /// would be inserted.
    pub fn locate(&self, time: TimeLabel) -> Result<usize, usize> {
        self.points.binary_search_by(|p| p.time.cmp(&time))
    }

    pub fn find(&self, time: TimeLabel) -> Option<&TimePoint> {
        self.locate(time).ok().map(|i| &self.points[i])
    }

    pub fn into_points(self) -> Vec<TimePoint> {
        self.points
    }
}

impl TryFrom<Vec<TimePoint>> for TimeSeries {
    type Error = SeriesError;

    fn try_from(points: Vec<TimePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<TimeSeries> for Vec<TimePoint> {
    fn from(series: TimeSeries) -> Self {
        series.points
    }
}

fn validate(points: &[TimePoint]) -> Result<(usize, Vec<f64>), SeriesError> {
    if points.is_empty() {
        return Err(SeriesError::Empty);
    }

    for (offset, pair) in points.windows(2).enumerate() {
        if pair[1].time <= pair[0].time {
            return Err(SeriesError::NonMonotonic {
                index: offset + 1,
                previous: pair[0].time,
                current: pair[1].time,
            });
        }
    }

    let mut now_index: Option<usize> = None;
    for (i, point) in points.iter().enumerate() {
        if !point.now {
            continue;
        }
        if let Some(first) = now_index {
            return Err(SeriesError::MultipleNow {
                first: points[first].time,
                second: point.time,
            });
        }
        now_index = Some(i);
    }
    let now_index = now_index.ok_or(SeriesError::MissingNow)?;

    let mut observed = Vec::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        check_finite(point)?;
        let time = point.time;
        let value = match i.cmp(&now_index) {
            Ordering::Less => {
                let actual = point.actual.ok_or(SeriesError::MissingActual { time })?;
                if point.predicted.is_some() || point.upper.is_some() || point.lower.is_some() {
                    return Err(SeriesError::UnexpectedPrediction { time });
                }
                actual
            }
            Ordering::Equal => {
                let actual = point.actual.ok_or(SeriesError::MissingActual { time })?;
                let predicted = point.predicted.ok_or(SeriesError::MissingPrediction {
                    time,
                    field: "predicted",
                })?;
                if actual != predicted {
                    return Err(SeriesError::StitchMismatch {
                        time,
                        actual,
                        predicted,
                    });
                }
                // A band at the stitch point is optional, but must be sane if present
                if point.upper.is_some() || point.lower.is_some() {
                    check_band(point, predicted)?;
                }
                actual
            }
            Ordering::Greater => {
                if point.actual.is_some() {
                    return Err(SeriesError::UnexpectedActual { time });
                }
                let predicted = point.predicted.ok_or(SeriesError::MissingPrediction {
                    time,
                    field: "predicted",
                })?;
                check_band(point, predicted)?;
                predicted
            }
        };
        observed.push(value);
    }

    Ok((now_index, observed))
}

fn check_band(point: &TimePoint, predicted: f64) -> Result<(), SeriesError> {
    let time = point.time;
    let upper = point.upper.ok_or(SeriesError::MissingPrediction {
        time,
        field: "upper",
    })?;
    let lower = point.lower.ok_or(SeriesError::MissingPrediction {
        time,
        field: "lower",
    })?;
    if lower < 0.0 {
        return Err(SeriesError::NegativeLowerBound { time, lower });
    }
    if lower > predicted || predicted > upper {
        return Err(SeriesError::BandInversion {
            time,
            lower,
            predicted,
            upper,
        });
    }
    Ok(())
}

fn check_finite(point: &TimePoint) -> Result<(), SeriesError> {
    let fields = [
        ("actual", point.actual),
        ("predicted", point.predicted),
        ("upper", point.upper),
        ("lower", point.lower),
        ("target", point.target),
    ];
    for (field, value) in fields {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(SeriesError::NonFinite {
                time: point.time,
                field,
            });
        }
    }
    Ok(())
}
