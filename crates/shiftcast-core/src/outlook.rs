//! Business readings derived from generated series.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::Temporal;
use crate::series::{TimeLabel, TimeSeries};

/// Whether a carrier's volume will be processed before its cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStatus {
    OnPace,
    AtRisk,
}

impl fmt::Display for PaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnPace => f.write_str("on pace"),
            Self::AtRisk => f.write_str("at risk"),
        }
    }
}

/// Projected value at the cutoff point compared with the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffOutlook {
    /// First grid point at or past cutoff
    pub at: TimeLabel,
    pub projected: f64,
    pub target: f64,
    pub status: PaceStatus,
    pub classification: Temporal,
}

impl CutoffOutlook {
    /// Units still missing at cutoff; zero when on pace.
    pub fn shortfall(&self) -> f64 {
        (self.target - self.projected).max(0.0)
    }
}

/// Compare the value at the first cutoff-flagged point with its target.
///
/// Returns `None` if no point is flagged or the flagged point carries no
/// target annotation.
pub fn assess_cutoff(series: &TimeSeries) -> Option<CutoffOutlook> {
    let (index, point) = series
        .points()
        .iter()
        .enumerate()
        .find(|(_, p)| p.is_past_cutoff())?;
    let target = point.target?;
    let projected = series.observed_values()[index];
    let status = if projected >= target {
        PaceStatus::OnPace
    } else {
        PaceStatus::AtRisk
    };
    Some(CutoffOutlook {
        at: point.time,
        projected,
        target,
        status,
        classification: Temporal::classify(point.time, series.now_label()),
    })
}

/// First grid label at which the series' observed value has reached zero.
///
/// Values are floored at zero, so the crossing always lands on a grid
/// point. `None` if the value stays above zero for the whole horizon.
pub fn estimate_clear_time(series: &TimeSeries) -> Option<TimeLabel> {
    let index = series.observed_values().iter().position(|v| *v <= 0.0)?;
    Some(series.points()[index].time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{generate_burndown_series, generate_cutoff_series};

    fn at(s: &str) -> TimeLabel {
        s.parse().unwrap()
    }

    #[test]
    fn carrier_reaching_target_is_on_pace() {
        let series = generate_cutoff_series(1850.0, 1247.0, 156.0, 14).unwrap();
        let outlook = assess_cutoff(&series).unwrap();
        assert_eq!(outlook.at, at("14:00"));
        assert_eq!(outlook.projected, 1850.0);
        assert_eq!(outlook.status, PaceStatus::OnPace);
        assert_eq!(outlook.shortfall(), 0.0);
        assert_eq!(outlook.classification, Temporal::Future);
    }

    #[test]
    fn slow_carrier_is_at_risk() {
        let series = generate_cutoff_series(2000.0, 600.0, 100.0, 13).unwrap();
        let outlook = assess_cutoff(&series).unwrap();
        assert_eq!(outlook.at, at("13:00"));
        assert_eq!(outlook.projected, 900.0);
        assert_eq!(outlook.status, PaceStatus::AtRisk);
        assert_eq!(outlook.shortfall(), 1100.0);
    }

    #[test]
    fn cutoff_beyond_grid_has_no_outlook() {
        let series = generate_cutoff_series(2000.0, 600.0, 100.0, 20).unwrap();
        assert!(assess_cutoff(&series).is_none());
    }

    #[test]
    fn queue_clears_at_first_empty_grid_point() {
        // 2310 remaining at 10:00, 520/h: 230 left at 14:00, floored to 0 at 15:00
        let series = generate_burndown_series(4200.0, 1890.0, 520.0).unwrap();
        assert_eq!(estimate_clear_time(&series), Some(at("15:00")));
    }

    #[test]
    fn queue_that_outlasts_horizon_has_no_clear_time() {
        let series = generate_burndown_series(10_000.0, 100.0, 50.0).unwrap();
        assert!(estimate_clear_time(&series).is_none());
    }

    #[test]
    fn empty_queue_is_clear_from_the_start() {
        let series = generate_burndown_series(0.0, 0.0, 10.0).unwrap();
        assert_eq!(estimate_clear_time(&series), Some(at("06:00")));
    }
}
