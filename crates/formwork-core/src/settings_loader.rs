//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMWORK_DEBUG` | `debug` |
//! | `FORMWORK_LOG_LEVEL` | `log_level` |
//! | `FORMWORK_LANGUAGE_CODE` | `language_code` |
//! | `FORMWORK_DEFAULT_REQUIRED` | `default_required` |
//! | `FORMWORK_SESSION_EXPIRATION` | `session_expiration` |
//! | `FORMWORK_CSRF_ENABLED` | `csrf_enabled` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formwork_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/forms.toml").unwrap();
//! let settings = settings_loader::from_json_file_with_env("config/forms.json").unwrap();
//! ```

use std::path::Path;

use crate::error::FormworkError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormworkError> {
    // Deserialize into a JSON value first so it can be merged over the defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormworkError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_into_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormworkError> {
    from_toml_str(&read_config_file(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormworkError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormworkError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormworkError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_into_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormworkError> {
    from_json_str(&read_config_file(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormworkError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `FORMWORK_*` environment variable overrides to a settings struct.
///
/// Boolean variables accept "true"/"1"/"yes"; anything else means `false`.
/// `FORMWORK_SESSION_EXPIRATION` values that do not parse as seconds are ignored.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("FORMWORK_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("FORMWORK_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("FORMWORK_LANGUAGE_CODE") {
        settings.language_code = val;
    }

    if let Ok(val) = std::env::var("FORMWORK_DEFAULT_REQUIRED") {
        settings.default_required = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("FORMWORK_SESSION_EXPIRATION") {
        if let Ok(seconds) = val.trim().parse::<u64>() {
            settings.session_expiration = Some(seconds);
        }
    }

    if let Ok(val) = std::env::var("FORMWORK_CSRF_ENABLED") {
        settings.csrf_enabled = parse_bool(&val);
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config_file(path: &Path, kind: &str) -> Result<String, FormworkError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormworkError::ConfigurationError(format!(
            "Failed to read {kind} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_into_defaults(value: serde_json::Value, kind: &str) -> Result<Settings, FormworkError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormworkError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        FormworkError::ConfigurationError(format!("Failed to deserialize settings from {kind}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
