//! BridgeConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for the command bridge.
///
/// This struct represents the contents of `aichef-bridge.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    // =========================================================================
    // Backend location
    // =========================================================================
    /// Backend script file name, relative to the project root.
    #[serde(default = "default_script_name")]
    pub script_name: String,

    /// Project-local virtual environment directory, relative to the project root.
    #[serde(default = "default_venv_dir")]
    pub venv_dir: String,

    /// Interpreter name inside `<venv_dir>/bin/`.
    #[serde(default = "default_venv_runtime")]
    pub venv_runtime: String,

    /// Directory holding the system-wide interpreter.
    #[serde(default = "default_system_bin_dir")]
    pub system_bin_dir: String,

    /// System interpreter name; also the bare name tried on PATH.
    #[serde(default = "default_system_runtime")]
    pub system_runtime: String,

    // =========================================================================
    // Process limits
    // =========================================================================
    /// Deadline for one call in seconds (`null` waits forever).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: Option<u64>,

    /// Maximum captured output in bytes (`null` is unbounded).
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: Option<u64>,

    // =========================================================================
    // Output handling
    // =========================================================================
    /// Whether stderr shares the JSON capture.
    #[serde(default)]
    pub capture: CaptureMode,

    /// Whether a non-zero exit fails the call.
    #[serde(default)]
    pub exit_status: ExitStatusPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            script_name: default_script_name(),
            venv_dir: default_venv_dir(),
            venv_runtime: default_venv_runtime(),
            system_bin_dir: default_system_bin_dir(),
            system_runtime: default_system_runtime(),
            timeout_seconds: default_timeout_seconds(),
            max_output_bytes: default_max_output_bytes(),
            capture: CaptureMode::default(),
            exit_status: ExitStatusPolicy::default(),
        }
    }
}
