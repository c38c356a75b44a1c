//! Configuration types and defaults for the bridge.
//!
//! This module defines enums, constants, and default value functions
//! used by the `BridgeConfig` struct.

use serde::{Deserialize, Serialize};

/// How the backend's two output streams are captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// stdout and stderr share one capture; diagnostics can corrupt the JSON (default).
    #[default]
    Merged,
    /// Only stdout is decoded; stderr is kept aside for error messages.
    Separate,
}

/// What the bridge does with the backend's exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatusPolicy {
    /// Ignore the exit status; only the output decides success (default).
    #[default]
    Ignore,
    /// Fail the call when the backend exits non-zero.
    RequireSuccess,
}

/// Default backend script file name, relative to the project root.
pub const DEFAULT_SCRIPT_NAME: &str = "app_bridge.py";

/// Default project-local virtual environment directory.
pub const DEFAULT_VENV_DIR: &str = ".venv";

/// Default interpreter name inside the virtual environment's `bin/`.
pub const DEFAULT_VENV_RUNTIME: &str = "python";

/// Default directory holding the system-wide interpreter.
pub const DEFAULT_SYSTEM_BIN_DIR: &str = "/usr/bin";

/// Default system interpreter name, also used for the PATH lookup.
pub const DEFAULT_SYSTEM_RUNTIME: &str = "python3";

/// Default deadline for one backend call, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Default cap on captured output (16 MiB).
pub const DEFAULT_MAX_OUTPUT_BYTES: u64 = 16 * 1024 * 1024;

pub fn default_script_name() -> String {
    DEFAULT_SCRIPT_NAME.to_string()
}

pub fn default_venv_dir() -> String {
    DEFAULT_VENV_DIR.to_string()
}

pub fn default_venv_runtime() -> String {
    DEFAULT_VENV_RUNTIME.to_string()
}

pub fn default_system_bin_dir() -> String {
    DEFAULT_SYSTEM_BIN_DIR.to_string()
}

pub fn default_system_runtime() -> String {
    DEFAULT_SYSTEM_RUNTIME.to_string()
}

pub fn default_timeout_seconds() -> Option<u64> {
    Some(DEFAULT_TIMEOUT_SECONDS)
}

pub fn default_max_output_bytes() -> Option<u64> {
    Some(DEFAULT_MAX_OUTPUT_BYTES)
}
