//! turtlegcode Settings Crate
//!
//! Handles the plotter configuration consumed by the generator: typed
//! defaults, merge-patch updates validated at the boundary, pen command
//! presets, and JSON/TOML settings files.

pub mod config;
pub mod error;
pub mod patch;

pub use config::{Config, PenPreset};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use patch::ConfigPatch;
