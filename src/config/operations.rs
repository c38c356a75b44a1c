//! Config loading, validation, and utility operations.

use super::model::BridgeConfig;
use crate::error::{BridgeError, Result};
use std::path::Path;
use std::time::Duration;

/// File name looked up in the project root when no config path is given.
pub const CONFIG_FILE_NAME: &str = "aichef-bridge.yaml";

impl BridgeConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(BridgeConfig)` - Successfully loaded and validated config
    /// * `Err(BridgeError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load `aichef-bridge.yaml` from a project root, falling back to defaults
    /// when the file does not exist.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_from_project<P: AsRef<Path>>(project_root: P) -> Result<Self> {
        let path = project_root.as_ref().join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no bridge config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: BridgeConfig = serde_yaml::from_str(yaml)
            .map_err(|e| BridgeError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - every path and interpreter name must be non-empty
    /// - `script_name` must be relative to the project root
    /// - `timeout_seconds` and `max_output_bytes` must be positive when set
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("script_name", &self.script_name),
            ("venv_dir", &self.venv_dir),
            ("venv_runtime", &self.venv_runtime),
            ("system_bin_dir", &self.system_bin_dir),
            ("system_runtime", &self.system_runtime),
        ] {
            if value.trim().is_empty() {
                return Err(BridgeError::Config(format!(
                    "config validation failed: {} must be non-empty",
                    field
                )));
            }
        }

        if Path::new(&self.script_name).is_absolute() {
            return Err(BridgeError::Config(format!(
                "config validation failed: script_name must be relative to the project root (found '{}')",
                self.script_name
            )));
        }

        if self.timeout_seconds == Some(0) {
            return Err(BridgeError::Config(
                "config validation failed: timeout_seconds must be greater than 0 (use null to disable)"
                    .to_string(),
            ));
        }

        if self.max_output_bytes == Some(0) {
            return Err(BridgeError::Config(
                "config validation failed: max_output_bytes must be greater than 0 (use null to disable)"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// The call deadline as a `Duration`, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}
