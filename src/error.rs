//! Error types shared across the crate

use crate::event::VirtualId;
use std::path::PathBuf;

/// Conflicts raised while populating the name, ID and shortcut registries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The name is already bound to another virtual ID
    #[error("Virtual ID name '{0}' already exists")]
    NameTaken(String),

    /// The explicitly supplied ID is already used by another name
    #[error("Virtual ID {id} already exists (registered as '{owner}')")]
    IdTaken { id: VirtualId, owner: String },

    /// The shortcut string already maps to a different virtual ID
    #[error("Shortcut '{shortcut}' already registered for virtual ID {owner}")]
    ShortcutTaken { shortcut: String, owner: VirtualId },

    /// A virtual controller with this name already exists
    #[error("Virtual controller '{0}' already exists")]
    ControllerExists(String),
}

/// Errors coming from the device layer
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The gamepad backend could not be brought up
    #[error("Failed to initialize gamepad backend: {0}")]
    InitializationError(String),

    /// The handle does not point at a registered device
    #[error("Unknown device: {0}")]
    UnknownDevice(String),
}

/// Errors raised while loading or validating the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),

    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}

/// Umbrella error for callers that do not care which layer failed
#[derive(Debug, thiserror::Error)]
pub enum InputsError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
