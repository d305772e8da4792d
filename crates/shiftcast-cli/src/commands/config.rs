use std::path::Path;

use clap::Subcommand;
use shiftcast_core::{ConfigError, EngineConfig};

use super::CommandResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the whole config as TOML
    Show,
    /// Get a config value
    Get {
        /// Dot-separated key (e.g. "horizon.step_minutes", "model.cutoff.upper_cap")
        key: String,
    },
    /// Set a config value
    Set {
        /// Dot-separated key
        key: String,
        /// New value ("none" clears an optional value)
        value: String,
    },
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, explicit: Option<&Path>) -> CommandResult {
    let path = super::config_path(explicit)?;
    match action {
        ConfigAction::Show => {
            let config = EngineConfig::load_from(&path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Get { key } => {
            let config = EngineConfig::load_from(&path)?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = EngineConfig::load_from(&path)?;
            config.set(&key, &value)?;
            config.save_to(&path)?;
            println!("ok");
        }
        ConfigAction::Reset => {
            EngineConfig::default().save_to(&path)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}
