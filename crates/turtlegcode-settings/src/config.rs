//! Plotter configuration for turtlegcode
//!
//! Holds the pen commands, feed rate, program start/end commands and output
//! scale used by the generator. Command strings are opaque: they are inserted
//! into the program verbatim and only checked for line breaks.
//!
//! Supports JSON and TOML settings files. Keys use the camelCase names of the
//! configuration surface (`penUp`, `penDown`, `feedRate`, `start`, `end`,
//! `scalePercent`); missing keys fall back to defaults and unknown keys are
//! ignored.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use crate::patch::ConfigPatch;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default pen-up command
pub const DEFAULT_PEN_UP: &str = "M5";
/// Default pen-down command
pub const DEFAULT_PEN_DOWN: &str = "M3";
/// Default drawing feed rate (output units per minute)
pub const DEFAULT_FEED_RATE: f64 = 3000.0;
/// Default program start command
pub const DEFAULT_START: &str = "G28";
/// Default program end command
pub const DEFAULT_END: &str = "M2";
/// Default output scale, percent
pub const DEFAULT_SCALE_PERCENT: f64 = 100.0;

/// Pen command presets for common plotter builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenPreset {
    /// Pen on the spindle/laser output (GRBL style M3/M5)
    #[default]
    Spindle,
    /// Hobby servo lifting the pen (Marlin M280)
    Servo,
    /// Pen carried on the Z axis
    ZAxis,
}

impl PenPreset {
    /// `(pen_up, pen_down)` commands for this preset
    pub fn commands(&self) -> (&'static str, &'static str) {
        match self {
            Self::Spindle => (DEFAULT_PEN_UP, DEFAULT_PEN_DOWN),
            Self::Servo => ("M280 P0 S90", "M280 P0 S0"),
            Self::ZAxis => ("G0 Z5", "G0 Z0"),
        }
    }
}

impl std::fmt::Display for PenPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spindle => write!(f, "spindle"),
            Self::Servo => write!(f, "servo"),
            Self::ZAxis => write!(f, "zaxis"),
        }
    }
}

impl FromStr for PenPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spindle" | "grbl" => Ok(Self::Spindle),
            "servo" => Ok(Self::Servo),
            "zaxis" | "z" => Ok(Self::ZAxis),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Command that lifts the pen
    pub pen_up: String,
    /// Command that lowers the pen
    pub pen_down: String,
    /// Feed rate for drawing moves (output units per minute)
    pub feed_rate: f64,
    /// Command emitted after the units/positioning header
    pub start: String,
    /// Command that ends the program
    pub end: String,
    /// Output scale; 100 maps one drawing unit to one output unit
    pub scale_percent: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pen_up: DEFAULT_PEN_UP.to_string(),
            pen_down: DEFAULT_PEN_DOWN.to_string(),
            feed_rate: DEFAULT_FEED_RATE,
            start: DEFAULT_START.to_string(),
            end: DEFAULT_END.to_string(),
            scale_percent: DEFAULT_SCALE_PERCENT,
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with the pen commands of `preset`
    pub fn with_preset(preset: PenPreset) -> Self {
        let (pen_up, pen_down) = preset.commands();
        Self {
            pen_up: pen_up.to_string(),
            pen_down: pen_down.to_string(),
            ..Self::default()
        }
    }

    /// Multiplier applied to shifted drawing coordinates
    pub fn scale(&self) -> f64 {
        self.scale_percent / 100.0
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        validate_positive("feedRate", self.feed_rate)?;
        validate_positive("scalePercent", self.scale_percent)?;
        validate_command("penUp", &self.pen_up)?;
        validate_command("penDown", &self.pen_down)?;
        validate_command("start", &self.start)?;
        validate_command("end", &self.end)?;
        Ok(())
    }

    /// Apply a merge-patch, field by field.
    ///
    /// The patched configuration is validated before it replaces `self`; on
    /// error `self` is left untouched.
    pub fn apply(&mut self, patch: &ConfigPatch) -> ConfigResult<()> {
        let mut next = self.clone();
        if let Some(pen_up) = &patch.pen_up {
            next.pen_up = pen_up.clone();
        }
        if let Some(pen_down) = &patch.pen_down {
            next.pen_down = pen_down.clone();
        }
        if let Some(feed_rate) = patch.feed_rate {
            next.feed_rate = feed_rate;
        }
        if let Some(start) = &patch.start {
            next.start = start.clone();
        }
        if let Some(end) = &patch.end {
            next.end = end.clone();
        }
        if let Some(scale_percent) = patch.scale_percent {
            next.scale_percent = scale_percent;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Default settings file location (`<config dir>/turtlegcode/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("turtlegcode").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                )
                .into())
            }
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded plotter configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                )
                .into())
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), "Saved plotter configuration");
        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn validate_positive(key: &str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite {
            key: key.to_string(),
            value,
        });
    }
    if value <= 0.0 {
        return Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value,
            min: 0.0,
        });
    }
    Ok(())
}

fn validate_command(key: &str, command: &str) -> ConfigResult<()> {
    if command.contains(['\n', '\r']) {
        return Err(ConfigError::InvalidCommand {
            key: key.to_string(),
            reason: "must be a single line".to_string(),
        });
    }
    Ok(())
}
