//! Live execution configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::LiveError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration for live execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveConfig {
    /// Debounce delay in milliseconds.
    #[serde(default = "default_execution_delay")]
    pub execution_delay: u64,

    /// Interpreter executable path or name.
    #[serde(default = "default_python_path")]
    pub python_path: String,

    /// Color token for non-error annotations.
    #[serde(default = "default_inline_color")]
    pub inline_color: String,

    /// Directory for scratch scripts (system temp dir when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

fn default_execution_delay() -> u64 {
    300
}

fn default_python_path() -> String {
    "python3".to_string()
}

fn default_inline_color() -> String {
    "grey".to_string()
}

impl LiveConfig {
    /// Configuration file names, in lookup order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".pylive.jsonc", ".pylive.json"];

    /// Settings section used by editor clients.
    pub const SETTINGS_SECTION: &'static str = "pythonLiveExecution";

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            execution_delay: default_execution_delay(),
            python_path: default_python_path(),
            inline_color: default_inline_color(),
            scratch_dir: None,
        }
    }

    /// Finds a configuration file directly inside `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    ///
    /// Comments and trailing commas are accepted. A relative `scratchDir`
    /// is resolved against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LiveError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LiveError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let (Some(parent), Some(scratch)) = (path.parent(), config.scratch_dir.as_ref())
            && scratch.is_relative()
        {
            config.scratch_dir = Some(parent.join(scratch));
        }

        Ok(config)
    }

    /// Parses configuration from a JSON (or JSONC) string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LiveError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LiveError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        Self::from_value(value)
    }

    /// Builds configuration from an already parsed value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, LiveError> {
        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LiveError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LiveError::config(format!("Invalid config: {}", e)))
    }

    /// Returns a copy with the keys present in `settings` applied on top.
    ///
    /// Accepts either the bare settings object or one nested under
    /// [`Self::SETTINGS_SECTION`]. Null values reset a key to its default.
    pub fn with_settings(&self, settings: &serde_json::Value) -> Result<Self, LiveError> {
        let settings = settings.get(Self::SETTINGS_SECTION).unwrap_or(settings);
        let overrides = match settings {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => return Ok(self.clone()),
            other => {
                return Err(LiveError::config(format!(
                    "Settings must be an object, got {}",
                    other
                )));
            }
        };

        let mut merged = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => serde_json::Map::new(),
            Err(e) => return Err(LiveError::internal(e.to_string())),
        };

        for (key, value) in overrides {
            if value.is_null() {
                merged.remove(key);
            } else {
                merged.insert(key.clone(), value.clone());
            }
        }

        Self::from_value(serde_json::Value::Object(merged))
    }

    /// Debounce delay as a [`Duration`].
    pub fn execution_delay(&self) -> Duration {
        Duration::from_millis(self.execution_delay)
    }

    /// Directory used for scratch scripts.
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self::new()
    }
}
