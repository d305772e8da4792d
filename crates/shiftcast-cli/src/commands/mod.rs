pub mod config;
pub mod dashboard;
pub mod series;

use std::path::{Path, PathBuf};

use shiftcast_core::{ConfigError, EngineConfig};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// The `--config` override, or the default location.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => EngineConfig::default_path(),
    }
}

/// Load the config in use; a missing file yields defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    EngineConfig::load_from(&config_path(explicit)?)
}
