//! Time-of-day labels for series grids.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LabelError;

/// A wall-clock time of day on a series grid.
///
/// Labels order by wall-clock time. The text form is `HH:MM`, or `HH:MM:SS`
/// when the label has a seconds component (scrub positions may land between
/// minutes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeLabel(NaiveTime);

impl TimeLabel {
    /// Sub-second precision is dropped; grid arithmetic works in whole seconds.
    pub fn new(time: NaiveTime) -> Self {
        Self(time.with_nanosecond(0).unwrap_or(time))
    }

    /// Build a label from hour and minute. Returns `None` if out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Build a label from hour, minute and second. Returns `None` if out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }

    pub fn seconds_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }

    /// Signed number of seconds from `self` to `later`.
    pub fn seconds_until(&self, later: TimeLabel) -> i64 {
        i64::from(later.seconds_from_midnight()) - i64::from(self.seconds_from_midnight())
    }

    /// Add whole minutes, refusing to wrap past midnight.
    pub fn checked_add_minutes(&self, minutes: u32) -> Option<Self> {
        let (time, wrapped) = self
            .0
            .overflowing_add_signed(Duration::minutes(i64::from(minutes)));
        (wrapped == 0).then_some(Self(time))
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.second() == 0 {
            write!(f, "{}", self.0.format("%H:%M"))
        } else {
            write!(f, "{}", self.0.format("%H:%M:%S"))
        }
    }
}

impl FromStr for TimeLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map(Self)
            .map_err(|_| LabelError {
                input: s.to_string(),
            })
    }
}

impl From<NaiveTime> for TimeLabel {
    fn from(time: NaiveTime) -> Self {
        Self::new(time)
    }
}

impl Serialize for TimeLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> TimeLabel {
        s.parse().unwrap()
    }

    #[test]
    fn parses_minutes_and_seconds() {
        assert_eq!(label("10:00"), TimeLabel::from_hm(10, 0).unwrap());
        assert_eq!(label("10:30:15"), TimeLabel::from_hms(10, 30, 15).unwrap());
        assert_eq!(label(" 06:05 "), TimeLabel::from_hm(6, 5).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!("25:00".parse::<TimeLabel>().is_err());
        assert!("ten".parse::<TimeLabel>().is_err());
        assert!("".parse::<TimeLabel>().is_err());
    }

    #[test]
    fn display_drops_zero_seconds() {
        assert_eq!(label("09:00").to_string(), "09:00");
        assert_eq!(label("09:00:30").to_string(), "09:00:30");
    }

    #[test]
    fn ordering_follows_wall_clock() {
        assert!(label("06:00") < label("10:00"));
        assert!(label("10:00") < label("10:00:01"));
    }

    #[test]
    fn add_minutes_refuses_to_wrap() {
        assert_eq!(label("23:00").checked_add_minutes(59), Some(label("23:59")));
        assert_eq!(label("23:00").checked_add_minutes(60), None);
    }

    #[test]
    fn seconds_until_is_signed() {
        assert_eq!(label("10:00").seconds_until(label("11:30")), 5400);
        assert_eq!(label("11:30").seconds_until(label("10:00")), -5400);
    }

    #[test]
    fn sub_second_precision_is_dropped() {
        let half_past = NaiveTime::from_hms_milli_opt(10, 0, 0, 500).unwrap();
        assert_eq!(TimeLabel::new(half_past), label("10:00"));
        assert_eq!(TimeLabel::from(half_past), label("10:00"));
        assert_eq!(TimeLabel::from(half_past).as_naive_time().nanosecond(), 0);
    }

    #[test]
    fn serde_uses_text_form() {
        let json = serde_json::to_string(&label("14:00")).unwrap();
        assert_eq!(json, "\"14:00\"");
        let back: TimeLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label("14:00"));
        assert!(serde_json::from_str::<TimeLabel>("\"noon\"").is_err());
    }
}
