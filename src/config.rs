//! Settings file
//!
//! ```toml
//! [engine]
//! axis_change_threshold = 10
//! pov_axis_threshold = 100
//! axis_extent = 255
//! invert_pov_left_right = false
//!
//! [unit]
//! tick_interval_ms = 16
//! gamepad_deadzone = 0.05
//! stats_interval_secs = 30
//! ```
//!
//! Missing keys and sections fall back to their defaults. Only settings live
//! here; virtual controller definitions are built by the host.

use crate::error::ConfigError;
use crate::remap::ControllerSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = ".config/virtual-inputs";
const CONFIG_FILE: &str = "inputs.toml";

/// Settings of the host loop driving an [`InputsUnit`](crate::InputsUnit)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSettings {
    pub tick_interval_ms: u64,
    pub gamepad_deadzone: f32,
    pub stats_interval_secs: u64,
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            gamepad_deadzone: 0.05,
            stats_interval_secs: 30,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    pub engine: ControllerSettings,
    pub unit: UnitSettings,
}

impl InputsConfig {
    /// `~/.config/virtual-inputs/inputs.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let mut path = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?;
        path.push(CONFIG_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads the file at [`default_path`](Self::default_path), falling back to
    /// the defaults when it is missing. Invalid files are still an error.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("{}, using default config", e);
                return Ok(Self::default());
            }
        };

        if !path.exists() {
            warn!("Config file {} does not exist, using default", path.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if engine.axis_change_threshold <= 0 {
            return Err(ConfigError::Invalid(format!(
                "engine.axis_change_threshold must be positive, got {}",
                engine.axis_change_threshold
            )));
        }
        if engine.pov_axis_threshold <= 0 {
            return Err(ConfigError::Invalid(format!(
                "engine.pov_axis_threshold must be positive, got {}",
                engine.pov_axis_threshold
            )));
        }
        if engine.axis_extent <= 0 {
            return Err(ConfigError::Invalid(format!(
                "engine.axis_extent must be positive, got {}",
                engine.axis_extent
            )));
        }
        if !(0.0..1.0).contains(&self.unit.gamepad_deadzone) {
            return Err(ConfigError::Invalid(format!(
                "unit.gamepad_deadzone must be in [0, 1), got {}",
                self.unit.gamepad_deadzone
            )));
        }
        if self.unit.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "unit.tick_interval_ms must not be 0".to_string(),
            ));
        }
        if self.unit.stats_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "unit.stats_interval_secs must not be 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_file_yields_defaults() {
        let config = InputsConfig::from_toml_str("").unwrap();
        assert_eq!(config, InputsConfig::default());
        assert_eq!(config.engine.pov_axis_threshold, 100);
        assert_eq!(config.unit.tick_interval_ms, 16);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = InputsConfig::from_toml_str(
            "[engine]\ninvert_pov_left_right = true\n[unit]\ntick_interval_ms = 8\n",
        )
        .unwrap();
        assert!(config.engine.invert_pov_left_right);
        assert_eq!(config.engine.axis_extent, 255);
        assert_eq!(config.unit.tick_interval_ms, 8);
        assert_eq!(config.unit.stats_interval_secs, 30);
    }

    #[rstest]
    #[case("[engine]\naxis_change_threshold = 0\n")]
    #[case("[engine]\npov_axis_threshold = -5\n")]
    #[case("[unit]\ngamepad_deadzone = 1.0\n")]
    #[case("[unit]\ntick_interval_ms = 0\n")]
    #[case("[unit]\nstats_interval_secs = 0\n")]
    fn invalid_values_are_rejected(#[case] content: &str) {
        assert!(matches!(
            InputsConfig::from_toml_str(content),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = InputsConfig::default();
        config.engine.pov_axis_threshold = 64;
        config.unit.gamepad_deadzone = 0.1;
        config.save(&path).unwrap();

        assert_eq!(InputsConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(InputsConfig::load(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            InputsConfig::from_toml_str("[engine"),
            Err(ConfigError::Parse(_))
        ));
    }
}
