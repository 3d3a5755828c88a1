//! Merge-patch updates for [`Config`](crate::Config)
//!
//! A patch names only the fields it changes. Patches arrive either typed (from
//! Rust callers and CLI flags) or as a loosely-typed JSON object (from a
//! settings panel). The loose form is checked key by key here; the merged
//! result is validated by [`Config::apply`](crate::Config::apply).

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field-by-field override for the generator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigPatch {
    pub pen_up: Option<String>,
    pub pen_down: Option<String>,
    pub feed_rate: Option<f64>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub scale_percent: Option<f64>,
}

impl ConfigPatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build a patch from a loosely-typed JSON object.
    ///
    /// Unknown keys and `null` values are ignored. Numbers may be given as
    /// JSON numbers or numeric strings; anything else for a numeric key is
    /// rejected, as is a non-string command.
    pub fn from_json(value: &Value) -> ConfigResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| ConfigError::NotAnObject(json_type(value).to_string()))?;

        let mut patch = Self::default();
        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "penUp" => patch.pen_up = Some(command_value(key, value)?),
                "penDown" => patch.pen_down = Some(command_value(key, value)?),
                "start" => patch.start = Some(command_value(key, value)?),
                "end" => patch.end = Some(command_value(key, value)?),
                "feedRate" => patch.feed_rate = Some(numeric_value(key, value)?),
                "scalePercent" => patch.scale_percent = Some(numeric_value(key, value)?),
                other => tracing::trace!(key = other, "Ignoring unrecognized configuration key"),
            }
        }
        Ok(patch)
    }
}

fn command_value(key: &str, value: &Value) -> ConfigResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("expected a command string, got {}", json_type(value)),
        })
}

fn numeric_value(key: &str, value: &Value) -> ConfigResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("expected a number, got {}", value),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
