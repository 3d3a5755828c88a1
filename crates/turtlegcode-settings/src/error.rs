//! Error types for the settings crate.
//!
//! [`ConfigError`] is the invalid-configuration error: a value that would
//! otherwise end up embedded verbatim in a motion program and make it
//! unusable. [`SettingsError`] covers reading and writing settings files.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings file operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file could not be loaded.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// The configuration file could not be saved.
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// The configuration directory could not be found.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// A configuration validation error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to configuration validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric value is NaN or infinite.
    #[error("Value for '{key}' must be a finite number, got {value}")]
    NonFinite { key: String, value: f64 },

    /// A numeric value is at or below its lower bound.
    #[error("Value out of range for '{key}': {value} (must be greater than {min})")]
    ValueOutOfRange { key: String, value: f64, min: f64 },

    /// A command string would break the line structure of the program.
    #[error("Invalid command for '{key}': {reason}")]
    InvalidCommand { key: String, reason: String },

    /// A patch value has the wrong type.
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// The patch is not a key/value object.
    #[error("Configuration patch must be an object, got {0}")]
    NotAnObject(String),

    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The preset name is unknown.
    #[error("Unknown pen preset: {0}")]
    UnknownPreset(String),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
