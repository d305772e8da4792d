//! Whole-dashboard rendering from a metrics fixture.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use shiftcast_core::{
    build_panels, ContextualTimeState, DashboardFixture, PanelKind, PanelSnapshot, SeededNoise,
    SeriesGenerator, TimeLabel,
};
use tracing::debug;

use super::CommandResult;
use crate::render;

#[derive(Args)]
pub struct DashboardArgs {
    /// Metrics fixture (TOML); the built-in fixture when absent
    #[arg(long, value_name = "FILE")]
    pub fixtures: Option<PathBuf>,
    /// Scrub every panel to this time (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    pub at: Option<TimeLabel>,
    /// Jitter seed; overrides [noise] seed
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct DashboardReport {
    scrub: Option<TimeLabel>,
    panels: Vec<PanelSnapshot>,
}

pub fn run(args: DashboardArgs, config_path: Option<&Path>) -> CommandResult {
    let config = super::load_config(config_path)?;
    let fixture = match &args.fixtures {
        Some(path) => DashboardFixture::load_from(path)?,
        None => DashboardFixture::default(),
    };
    let mut noise = match args.seed {
        Some(seed) => SeededNoise::from_seed(seed),
        None => config.noise.source(),
    };

    let panels = build_panels(&SeriesGenerator::from_config(&config), &fixture, &mut noise);

    let mut scrub = ContextualTimeState::new();
    let mut readers: Vec<_> = panels.iter().map(|_| scrub.subscribe()).collect();
    scrub.set(args.at);

    // One render pass: every panel observes the same scrub position
    let snapshots: Vec<PanelSnapshot> = panels
        .iter()
        .zip(readers.iter_mut())
        .map(|(panel, reader)| panel.snapshot(reader.observe()))
        .collect();
    debug!(
        panels = snapshots.len(),
        unavailable = snapshots.iter().filter(|s| s.error.is_some()).count(),
        scrubbing = scrub.is_scrubbing(),
        "dashboard rendered"
    );

    let report = DashboardReport {
        scrub: scrub.get(),
        panels: snapshots,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.scrub {
        Some(time) => println!("Scrubbed to {time}"),
        None => println!("Live"),
    }
    for snapshot in &report.panels {
        println!();
        println!("== {} ({}) ==", snapshot.name, render::kind_label(snapshot.kind));
        let Some(reading) = &snapshot.reading else {
            let reason = snapshot.error.as_deref().unwrap_or("unknown error");
            println!("no forecast available: {reason}");
            continue;
        };
        for line in render::reading_lines(reading) {
            println!("{line}");
        }
        if let Some(outlook) = &snapshot.outlook {
            println!("{}", render::outlook_line(outlook));
        }
        if snapshot.kind == PanelKind::Queue {
            println!("{}", render::clear_line(snapshot.clear_time));
        }
    }
    Ok(())
}
