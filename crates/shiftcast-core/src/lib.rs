//! # Shiftcast Core Library
//!
//! This library provides the predictive timeline engine behind the Shiftcast
//! warehouse operations dashboard. Live KPIs and short-horizon forecasts
//! (throughput, staffing, zone capacity, carrier cutoffs, queue burndown)
//! are all expressed as one kind of series, split at "now" into an observed
//! segment and a forecast segment with confidence bounds.
//!
//! ## Architecture
//!
//! - **Series model**: validated [`TimeSeries`] of [`TimePoint`]s on a
//!   [`TimeLabel`] grid
//! - **Generators**: deterministic ramp, cutoff and burndown trajectories
//!   built on a shared [`HorizonConfig`], with injectable noise
//! - **Query engine**: [`query_at`] interpolates a series at any instant and
//!   classifies it as past, now or future
//! - **Contextual time**: [`ContextualTimeState`] holds the dashboard's one
//!   scrub position; widgets read it through [`ContextualTimeReader`]s
//!
//! ## Key Components
//!
//! - [`SeriesGenerator`]: configured entry point for all generators
//! - [`EngineConfig`]: TOML configuration
//! - [`build_panels`]: turns a metrics fixture into per-panel forecasts

pub mod config;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod grid;
pub mod outlook;
pub mod query;
pub mod series;

pub use config::{data_dir, EngineConfig};
pub use context::{ContextualTimeReader, ContextualTimeState};
pub use dashboard::{build_panels, DashboardFixture, Panel, PanelForecast, PanelKind, PanelSnapshot};
pub use error::{ConfigError, CoreError, GeneratorError, GridError, LabelError, SeriesError};
pub use forecast::{
    generate_burndown_series, generate_cutoff_series, generate_ramp_series, BurndownParams,
    CutoffParams, ModelConfig, NoiseSource, RampParams, SeededNoise, SeriesGenerator,
};
pub use grid::{HorizonConfig, HorizonGrid};
pub use outlook::{assess_cutoff, estimate_clear_time, CutoffOutlook, PaceStatus};
pub use query::{query_at, read_timeline, QueryResult, Temporal, TimelineReading};
pub use series::{TimeLabel, TimePoint, TimeSeries};
