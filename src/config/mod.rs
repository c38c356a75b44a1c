//! Configuration model for the command bridge.
//!
//! This module defines the `BridgeConfig` struct that represents
//! `aichef-bridge.yaml` in the project root. It supports forward-compatible
//! YAML parsing (unknown fields are ignored), defaults for every field, and
//! validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::BridgeConfig;
pub use operations::CONFIG_FILE_NAME;
pub use types::{CaptureMode, ExitStatusPolicy};
