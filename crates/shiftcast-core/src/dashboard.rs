//! Dashboard fixtures and per-panel forecasts.
//!
//! The dashboard is fed by a bundle of current business metrics (today a
//! fixture, later a telemetry feed). Every metric becomes one panel. A panel
//! whose generator rejects its inputs shows "no forecast available"; the
//! other panels are unaffected.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, CoreError, GeneratorError};
use crate::forecast::{BurndownParams, CutoffParams, NoiseSource, RampParams, SeriesGenerator};
use crate::outlook::{assess_cutoff, estimate_clear_time, CutoffOutlook};
use crate::query::{read_timeline, TimelineReading};
use crate::series::{TimeLabel, TimeSeries};

/// A KPI tracked with a ramp series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiFixture {
    pub name: String,
    #[serde(flatten)]
    pub params: RampParams,
}

/// A carrier racing its cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierFixture {
    pub name: String,
    #[serde(flatten)]
    pub params: CutoffParams,
}

/// A work queue burning down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueFixture {
    pub name: String,
    #[serde(flatten)]
    pub params: BurndownParams,
}

/// Current metrics for every dashboard panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFixture {
    #[serde(default)]
    pub kpis: Vec<KpiFixture>,
    #[serde(default)]
    pub carriers: Vec<CarrierFixture>,
    #[serde(default)]
    pub queues: Vec<QueueFixture>,
}

impl Default for DashboardFixture {
    fn default() -> Self {
        Self {
            kpis: vec![
                KpiFixture {
                    name: "Units picked".into(),
                    params: RampParams::new(0.0, 4200.0, 0.08, 200.0),
                },
                KpiFixture {
                    name: "Pickers on floor".into(),
                    params: RampParams::new(38.0, 44.0, 0.05, 0.0),
                },
                KpiFixture {
                    name: "Zone B capacity %".into(),
                    params: RampParams::new(62.0, 88.0, 0.1, -4.0),
                },
            ],
            carriers: vec![
                CarrierFixture {
                    name: "UPS Ground".into(),
                    params: CutoffParams::new(1850.0, 1247.0, 156.0, 14),
                },
                CarrierFixture {
                    name: "FedEx Express".into(),
                    params: CutoffParams::new(620.0, 410.0, 48.0, 12),
                },
                CarrierFixture {
                    name: "USPS Priority".into(),
                    params: CutoffParams::new(940.0, 520.0, 110.0, 15),
                },
            ],
            queues: vec![
                QueueFixture {
                    name: "Outbound picks".into(),
                    params: BurndownParams::new(4200.0, 1890.0, 520.0),
                },
                QueueFixture {
                    name: "Returns".into(),
                    params: BurndownParams::new(900.0, 240.0, 60.0),
                },
            ],
        }
    }
}

impl DashboardFixture {
    /// Read a fixture bundle from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CoreError::Config(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })
    }

    pub fn panel_count(&self) -> usize {
        self.kpis.len() + self.carriers.len() + self.queues.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Kpi,
    Carrier,
    Queue,
}

/// What a panel has to show.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelForecast {
    Ready(TimeSeries),
    Unavailable(String),
}

/// One dashboard panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub name: String,
    pub kind: PanelKind,
    pub forecast: PanelForecast,
}

impl Panel {
    fn from_result(
        name: &str,
        kind: PanelKind,
        result: Result<TimeSeries, GeneratorError>,
    ) -> Self {
        let forecast = match result {
            Ok(series) => PanelForecast::Ready(series),
            Err(e) => {
                warn!(panel = %name, error = %e, "no forecast available");
                PanelForecast::Unavailable(e.to_string())
            }
        };
        Self {
            name: name.to_string(),
            kind,
            forecast,
        }
    }

    pub fn series(&self) -> Option<&TimeSeries> {
        match &self.forecast {
            PanelForecast::Ready(series) => Some(series),
            PanelForecast::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.series().is_some()
    }

    /// Serializable view of this panel at the given scrub position.
    pub fn snapshot(&self, scrub: Option<TimeLabel>) -> PanelSnapshot {
        let series = self.series();
        PanelSnapshot {
            name: self.name.clone(),
            kind: self.kind,
            reading: series.map(|s| read_timeline(s, scrub)),
            outlook: series
                .filter(|_| self.kind == PanelKind::Carrier)
                .and_then(assess_cutoff),
            clear_time: series
                .filter(|_| self.kind == PanelKind::Queue)
                .and_then(estimate_clear_time),
            error: match &self.forecast {
                PanelForecast::Unavailable(reason) => Some(reason.clone()),
                PanelForecast::Ready(_) => None,
            },
        }
    }
}

/// Everything a renderer needs for one panel at one scrub position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub name: String,
    pub kind: PanelKind,
    pub reading: Option<TimelineReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlook: Option<CutoffOutlook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_time: Option<TimeLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generate every panel of `fixture`, scoping failures to their panel.
pub fn build_panels<N>(
    generator: &SeriesGenerator,
    fixture: &DashboardFixture,
    noise: &mut N,
) -> Vec<Panel>
where
    N: NoiseSource + ?Sized,
{
    let mut panels = Vec::with_capacity(fixture.panel_count());
    for kpi in &fixture.kpis {
        let result = generator.ramp(&kpi.params, noise);
        panels.push(Panel::from_result(&kpi.name, PanelKind::Kpi, result));
    }
    for carrier in &fixture.carriers {
        let result = generator.cutoff(&carrier.params);
        panels.push(Panel::from_result(&carrier.name, PanelKind::Carrier, result));
    }
    for queue in &fixture.queues {
        let result = generator.burndown(&queue.params);
        panels.push(Panel::from_result(&queue.name, PanelKind::Queue, result));
    }
    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{SeededNoise, Silent};
    use crate::outlook::PaceStatus;

    #[test]
    fn default_fixture_builds_every_panel() {
        let fixture = DashboardFixture::default();
        let panels = build_panels(
            &SeriesGenerator::new(),
            &fixture,
            &mut SeededNoise::from_seed(1),
        );
        assert_eq!(panels.len(), fixture.panel_count());
        assert!(panels.iter().all(Panel::is_available));
    }

    #[test]
    fn failing_panel_does_not_take_down_the_rest() {
        let mut fixture = DashboardFixture::default();
        fixture.queues[1].params.done = 5000.0;
        let panels = build_panels(&SeriesGenerator::new(), &fixture, &mut Silent);

        let broken: Vec<&Panel> = panels.iter().filter(|p| !p.is_available()).collect();
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].name, "Returns");

        let snapshot = broken[0].snapshot(None);
        assert!(snapshot.reading.is_none());
        assert!(snapshot.error.unwrap().contains("done"));
        assert_eq!(panels.iter().filter(|p| p.is_available()).count(), 7);
    }

    #[test]
    fn snapshots_carry_kind_specific_readings() {
        let panels = build_panels(
            &SeriesGenerator::new(),
            &DashboardFixture::default(),
            &mut Silent,
        );
        let ups = panels.iter().find(|p| p.name == "UPS Ground").unwrap();
        let snapshot = ups.snapshot(Some("12:30".parse().unwrap()));
        assert_eq!(snapshot.outlook.unwrap().status, PaceStatus::OnPace);
        assert!(snapshot.clear_time.is_none());
        assert!(snapshot.reading.unwrap().scrubbed.is_some());

        let fedex = panels.iter().find(|p| p.name == "FedEx Express").unwrap();
        assert_eq!(
            fedex.snapshot(None).outlook.unwrap().status,
            PaceStatus::AtRisk
        );

        let outbound = panels.iter().find(|p| p.name == "Outbound picks").unwrap();
        let snapshot = outbound.snapshot(None);
        assert_eq!(snapshot.clear_time.unwrap().to_string(), "15:00");
        assert!(snapshot.outlook.is_none());
    }

    #[test]
    fn fixture_parses_from_toml() {
        let fixture: DashboardFixture = toml::from_str(
            r#"
            [[carriers]]
            name = "DHL"
            target = 300
            current = 120
            velocity = 40
            cutoff_hour = 13

            [[queues]]
            name = "Replenishment"
            total = 800
            done = 200
            velocity = 90.5
            "#,
        )
        .unwrap();
        assert!(fixture.kpis.is_empty());
        assert_eq!(fixture.carriers[0].params.cutoff_hour, 13);
        assert_eq!(fixture.queues[0].params.velocity, 90.5);
    }
}
