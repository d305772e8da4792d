//! TOML-based engine configuration.
//!
//! Stores the settings shared by every generator:
//! - Horizon grid layout (start, step, now index, window lengths)
//! - Model constants per generator
//! - Noise seed
//!
//! Configuration is stored at `~/.config/shiftcast/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::forecast::{ModelConfig, NoiseConfig};
use crate::grid::HorizonConfig;

/// Engine configuration.
///
/// Serialized to/from TOML. Every section has defaults, so a partial file
/// (or none at all) is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub horizon: HorizonConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub noise: NoiseConfig,
}

/// Returns `~/.config/shiftcast[-dev]/` based on SHIFTCAST_ENV.
///
/// Set SHIFTCAST_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SHIFTCAST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("shiftcast-dev")
    } else {
        base_dir.join("shiftcast")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirectoryUnavailable(e.to_string()))?;
    Ok(dir)
}

impl EngineConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if matches!(parts.peek(), None | Some(&"")) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = if matches!(value, "none" | "null") {
                    serde_json::Value::Null
                } else {
                    match existing {
                        serde_json::Value::Bool(_) => serde_json::Value::Bool(
                            value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                        ),
                        serde_json::Value::Number(_) | serde_json::Value::Null => {
                            parse_number(value).ok_or_else(|| {
                                invalid(format!("cannot parse '{value}' as number"))
                            })?
                        }
                        serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                            serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                        }
                        serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                    }
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// `config.toml` inside [`data_dir`].
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, or defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, or defaults if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: EngineConfig = toml::from_str(&content).map_err(|e| {
                    ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    }
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key.
    ///
    /// The new value must parse as the type of the existing one and the
    /// resulting config must validate; otherwise `self` is left unchanged.
    /// `none` clears an optional value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: EngineConfig =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check that the grids can be built and the model constants are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.horizon
            .window_grid()
            .and_then(|_| self.horizon.shift_grid())
            .map_err(|e| ConfigError::InvalidValue {
                key: "horizon".to_string(),
                message: e.to_string(),
            })?;

        let constants = [
            ("model.ramp.jitter_fraction", self.model.ramp.jitter_fraction),
            ("model.ramp.band_factor", self.model.ramp.band_factor),
            ("model.cutoff.progress_cap", self.model.cutoff.progress_cap),
            ("model.cutoff.overshoot_cap", self.model.cutoff.overshoot_cap),
            ("model.cutoff.band_fraction", self.model.cutoff.band_fraction),
            ("model.cutoff.upper_cap", self.model.cutoff.upper_cap),
            ("model.burndown.band_step", self.model.burndown.band_step),
        ];
        for (key, value) in constants {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

fn parse_number(value: &str) -> Option<serde_json::Value> {
    if let Ok(n) = value.parse::<u64>() {
        Some(serde_json::Value::Number(n.into()))
    } else {
        value
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = EngineConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: EngineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.horizon.now_index, 4);
        assert_eq!(parsed.model.cutoff.overshoot_cap, 1.1);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: EngineConfig = toml::from_str(
            r#"
            [model.burndown]
            band_step = 25.0

            [noise]
            seed = 99
            "#,
        )
        .unwrap();
        assert_eq!(cfg.model.burndown.band_step, 25.0);
        assert_eq!(cfg.model.ramp.band_factor, 0.15);
        assert_eq!(cfg.noise.seed, Some(99));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.get("horizon.start").as_deref(), Some("06:00"));
        assert_eq!(cfg.get("horizon.window_points").as_deref(), Some("9"));
        assert_eq!(cfg.get("model.cutoff.upper_cap").as_deref(), Some("1.15"));
        assert_eq!(cfg.get("noise.seed").as_deref(), Some("null"));
        assert!(cfg.get("horizon.missing").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = EngineConfig::default();
        cfg.set("model.burndown.band_step", "55").unwrap();
        assert_eq!(cfg.model.burndown.band_step, 55.0);
        cfg.set("horizon.start", "07:00").unwrap();
        assert_eq!(cfg.horizon.start.to_string(), "07:00");
        cfg.set("noise.seed", "1234").unwrap();
        assert_eq!(cfg.noise.seed, Some(1234));
        cfg.set("noise.seed", "none").unwrap();
        assert_eq!(cfg.noise.seed, None);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = EngineConfig::default();
        assert!(matches!(
            cfg.set("horizon.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = EngineConfig::default();
        assert!(cfg.set("horizon.step_minutes", "hourly").is_err());
        assert!(cfg.set("horizon.start", "lunchtime").is_err());
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn set_rejects_point_count_past_midnight() {
        let mut cfg = EngineConfig::default();
        let result = cfg.set("horizon.window_points", "4000000000000000000");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        assert!(cfg.set("horizon.shift_points", "25").is_err());
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn set_rejects_layout_without_horizon() {
        let mut cfg = EngineConfig::default();
        let err = cfg.set("horizon.now_index", "8").unwrap_err();
        assert!(err.to_string().contains("horizon"));
        assert_eq!(cfg.horizon.now_index, 4);
    }

    #[test]
    fn validate_rejects_negative_constants() {
        let mut cfg = EngineConfig::default();
        cfg.model.ramp.band_factor = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let missing = EngineConfig::load_from(&path).unwrap();
        assert_eq!(missing, EngineConfig::default());

        let mut cfg = EngineConfig::default();
        cfg.noise.seed = Some(7);
        cfg.model.cutoff.overshoot_cap = 1.25;
        cfg.save_to(&path).unwrap();

        let loaded = EngineConfig::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[horizon]\nstart = 6").unwrap();
        assert!(matches!(
            EngineConfig::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
