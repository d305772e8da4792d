//! Single-series generation.

use std::path::Path;

use clap::{Args, Subcommand};
use serde::Serialize;
use shiftcast_core::{
    assess_cutoff, estimate_clear_time, read_timeline, BurndownParams, CutoffOutlook,
    CutoffParams, PanelKind, RampParams, SeededNoise, SeriesGenerator, TimeLabel, TimeSeries,
    TimelineReading,
};

use super::CommandResult;
use crate::render;

#[derive(Args)]
pub struct ReadingArgs {
    /// Also read the series at this time (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    pub at: Option<TimeLabel>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum SeriesKind {
    /// Linear trajectory with jitter (throughput, staffing, zone capacity)
    Ramp {
        /// Value at the start of the window
        base_actual: f64,
        /// Value at the end of the window, before trend
        base_predicted: f64,
        /// Band width driver (0.0-1.0)
        variance: f64,
        /// Additive drift across the window
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        trend: f64,
        /// Jitter seed; overrides [noise] seed
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        reading: ReadingArgs,
    },
    /// Carrier burnup toward a target before the cutoff hour
    Cutoff {
        /// Units to ship before cutoff
        target: f64,
        /// Units processed so far
        current: f64,
        /// Units per hour
        velocity: f64,
        /// Hour (0-23) the truck leaves
        cutoff_hour: u32,
        #[command(flatten)]
        reading: ReadingArgs,
    },
    /// Work queue burning down
    Burndown {
        /// Queue size at shift start
        total: f64,
        /// Units done so far
        done: f64,
        /// Units per hour
        velocity: f64,
        #[command(flatten)]
        reading: ReadingArgs,
    },
}

#[derive(Serialize)]
struct SeriesReport<'a> {
    points: &'a TimeSeries,
    reading: TimelineReading,
    #[serde(skip_serializing_if = "Option::is_none")]
    outlook: Option<CutoffOutlook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clear_time: Option<TimeLabel>,
}

pub fn run(kind: SeriesKind, config_path: Option<&Path>) -> CommandResult {
    let config = super::load_config(config_path)?;
    let generator = SeriesGenerator::from_config(&config);

    let (panel_kind, series, args) = match kind {
        SeriesKind::Ramp {
            base_actual,
            base_predicted,
            variance,
            trend,
            seed,
            reading,
        } => {
            let params = RampParams::new(base_actual, base_predicted, variance, trend);
            let mut noise = match seed {
                Some(seed) => SeededNoise::from_seed(seed),
                None => config.noise.source(),
            };
            (PanelKind::Kpi, generator.ramp(&params, &mut noise)?, reading)
        }
        SeriesKind::Cutoff {
            target,
            current,
            velocity,
            cutoff_hour,
            reading,
        } => {
            let params = CutoffParams::new(target, current, velocity, cutoff_hour);
            (PanelKind::Carrier, generator.cutoff(&params)?, reading)
        }
        SeriesKind::Burndown {
            total,
            done,
            velocity,
            reading,
        } => {
            let params = BurndownParams::new(total, done, velocity);
            (PanelKind::Queue, generator.burndown(&params)?, reading)
        }
    };

    let report = SeriesReport {
        points: &series,
        reading: read_timeline(&series, args.at),
        outlook: match panel_kind {
            PanelKind::Carrier => assess_cutoff(&series),
            _ => None,
        },
        clear_time: match panel_kind {
            PanelKind::Queue => estimate_clear_time(&series),
            _ => None,
        },
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", render::series_table(&series));
    println!();
    for line in render::reading_lines(&report.reading) {
        println!("{line}");
    }
    if let Some(outlook) = &report.outlook {
        println!("{}", render::outlook_line(outlook));
    }
    if panel_kind == PanelKind::Queue {
        println!("{}", render::clear_line(report.clear_time));
    }
    Ok(())
}
