//! Point-in-time queries against a materialized series.
//!
//! The query engine only reads what a generator already produced. Between
//! grid points it interpolates linearly on elapsed wall-clock time; it never
//! re-runs business logic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::series::{TimeLabel, TimeSeries};

/// Where a query time sits relative to the series' now marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temporal {
    Past,
    Now,
    Future,
}

impl Temporal {
    pub fn classify(time: TimeLabel, now: TimeLabel) -> Self {
        if time < now {
            Self::Past
        } else if time == now {
            Self::Now
        } else {
            Self::Future
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Now => "now",
            Self::Future => "future",
        }
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best estimate of a series at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub time: TimeLabel,
    /// `None` when `time` lies outside the series
    pub value: Option<f64>,
    pub classification: Temporal,
}

/// Estimate `series` at `time`.
///
/// Exact grid hits return the point's observed value (actual, else
/// predicted). Times strictly between two grid points interpolate linearly
/// between their observed values. Times outside the first/last label give
/// `value: None`; the classification is reported either way.
pub fn query_at(series: &TimeSeries, time: TimeLabel) -> QueryResult {
    QueryResult {
        time,
        value: value_at(series, time),
        classification: Temporal::classify(time, series.now_label()),
    }
}

fn value_at(series: &TimeSeries, time: TimeLabel) -> Option<f64> {
    if time < series.first_label() || time > series.last_label() {
        return None;
    }
    let values = series.observed_values();
    match series.locate(time) {
        Ok(index) => Some(values[index]),
        Err(next) => {
            // In range and not on the grid, so 0 < next < len
            let points = series.points();
            let (prev, next_point) = (&points[next - 1], &points[next]);
            let span = prev.time.seconds_until(next_point.time) as f64;
            let elapsed = prev.time.seconds_until(time) as f64;
            let (va, vb) = (values[next - 1], values[next]);
            Some(va + (vb - va) * elapsed / span)
        }
    }
}

/// The three numbers a KPI badge shows for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineReading {
    pub now: TimeLabel,
    pub now_value: f64,
    pub horizon_end: TimeLabel,
    pub horizon_end_value: f64,
    /// Present only while a scrub position is active
    pub scrubbed: Option<QueryResult>,
}

/// Read `series` at now, at its horizon end and, if set, at `scrub`.
pub fn read_timeline(series: &TimeSeries, scrub: Option<TimeLabel>) -> TimelineReading {
    TimelineReading {
        now: series.now_label(),
        now_value: series.now_value(),
        horizon_end: series.last_label(),
        horizon_end_value: series.horizon_end_value(),
        scrubbed: scrub.map(|time| query_at(series, time)),
    }
}
