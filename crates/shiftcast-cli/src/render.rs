//! Plain-text rendering of series and readings.

use std::fmt::Write;

use shiftcast_core::{
    CutoffOutlook, PaceStatus, PanelKind, QueryResult, Temporal, TimeLabel, TimeSeries,
    TimelineReading,
};

/// Whole numbers without decimals, anything else with one.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_else(|| "-".to_string())
}

pub fn kind_label(kind: PanelKind) -> &'static str {
    match kind {
        PanelKind::Kpi => "kpi",
        PanelKind::Carrier => "carrier",
        PanelKind::Queue => "queue",
    }
}

/// One row per point; the now point and post-cutoff points are flagged.
pub fn series_table(series: &TimeSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:>9} {:>9} {:>9} {:>9}",
        "time", "actual", "predicted", "lower", "upper"
    );
    for point in series.points() {
        let mut flags = Vec::new();
        if point.now {
            flags.push("now");
        }
        if point.is_past_cutoff() {
            flags.push("cutoff");
        }
        let row = format!(
            "{:<6} {:>9} {:>9} {:>9} {:>9}  {}",
            point.time.to_string(),
            cell(point.actual),
            cell(point.predicted),
            cell(point.lower),
            cell(point.upper),
            flags.join(",")
        );
        let _ = writeln!(out, "{}", row.trim_end());
    }
    out
}

/// "value @ time", labelled past/now/projected.
pub fn scrubbed(result: &QueryResult) -> String {
    let label = match result.classification {
        Temporal::Past => "past",
        Temporal::Now => "now",
        Temporal::Future => "projected",
    };
    match result.value {
        Some(value) => format!("{} = {} ({label})", result.time, format_value(value)),
        None => format!("{} = outside the series ({label})", result.time),
    }
}

pub fn reading_lines(reading: &TimelineReading) -> Vec<String> {
    let mut lines = vec![
        format!("now      {} = {}", reading.now, format_value(reading.now_value)),
        format!(
            "horizon  {} = {}",
            reading.horizon_end,
            format_value(reading.horizon_end_value)
        ),
    ];
    if let Some(result) = &reading.scrubbed {
        lines.push(format!("at       {}", scrubbed(result)));
    }
    lines
}

pub fn outlook_line(outlook: &CutoffOutlook) -> String {
    let status = match outlook.status {
        PaceStatus::OnPace => outlook.status.to_string(),
        PaceStatus::AtRisk => format!(
            "{}, short {}",
            outlook.status,
            format_value(outlook.shortfall())
        ),
    };
    format!(
        "cutoff   {} projected {} of {} ({status})",
        outlook.at,
        format_value(outlook.projected),
        format_value(outlook.target)
    )
}

pub fn clear_line(clear_time: Option<TimeLabel>) -> String {
    match clear_time {
        Some(time) => format!("clears   {time}"),
        None => "clears   not within the horizon".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftcast_core::{assess_cutoff, generate_cutoff_series, query_at};

    #[test]
    fn values_drop_needless_decimals() {
        assert_eq!(format_value(2200.0), "2200");
        assert_eq!(format_value(1622.5), "1622.5");
        assert_eq!(format_value(12.34), "12.3");
    }

    #[test]
    fn table_flags_now_and_cutoff() {
        let series = generate_cutoff_series(1850.0, 1247.0, 156.0, 14).unwrap();
        let table = series_table(&series);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), series.len() + 1);
        assert!(lines[5].starts_with("10:00") && lines[5].ends_with("now"));
        assert!(lines[1].contains('-'));
        assert!(lines[9].starts_with("14:00") && lines[9].ends_with("cutoff"));
    }

    #[test]
    fn past_scrub_is_labelled() {
        let series = generate_cutoff_series(1850.0, 1247.0, 156.0, 14).unwrap();
        let line = scrubbed(&query_at(&series, "08:00".parse().unwrap()));
        assert!(line.ends_with("(past)"), "{line}");
        let line = scrubbed(&query_at(&series, "20:00".parse().unwrap()));
        assert_eq!(line, "20:00 = outside the series (projected)");
    }

    #[test]
    fn at_risk_outlook_shows_shortfall() {
        let series = generate_cutoff_series(2000.0, 600.0, 100.0, 13).unwrap();
        let line = outlook_line(&assess_cutoff(&series).unwrap());
        assert_eq!(line, "cutoff   13:00 projected 900 of 2000 (at risk, short 1100)");
    }
}
