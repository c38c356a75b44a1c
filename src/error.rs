//! Error types for the command bridge.
//!
//! Uses thiserror for derive macros and keeps every message user-actionable.
//! Only spawn and decode failures (plus the configured limits) surface here;
//! missing or mistyped response fields are absorbed by the `response` module.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The backend process could not be started (missing file, permission denied).
    #[error("failed to start backend: {0}")]
    Spawn(String),

    /// Captured output was not valid UTF-8 or not a single JSON object.
    #[error("invalid backend response: {0}")]
    Decode(String),

    /// The backend did not exit before the configured deadline.
    #[error("backend timed out: {0}")]
    Timeout(String),

    /// The backend wrote more than the configured output cap.
    #[error("backend output too large: {0}")]
    OutputTooLarge(String),

    /// The backend exited non-zero and strict exit handling is enabled.
    #[error("backend exited with failure: {0}")]
    BackendExit(String),

    /// The bridge configuration file is unreadable or invalid.
    #[error("{0}")]
    Config(String),

    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// A background call finished without delivering its result.
    #[error("background call disconnected: {0}")]
    Disconnected(String),
}

impl BridgeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::Spawn(_) => exit_codes::SPAWN_FAILURE,
            BridgeError::Decode(_) => exit_codes::DECODE_FAILURE,
            BridgeError::Timeout(_) => exit_codes::LIMIT_EXCEEDED,
            BridgeError::OutputTooLarge(_) => exit_codes::LIMIT_EXCEEDED,
            BridgeError::BackendExit(_) => exit_codes::BACKEND_FAILURE,
            BridgeError::Config(_) => exit_codes::USER_ERROR,
            BridgeError::UserError(_) => exit_codes::USER_ERROR,
            BridgeError::Disconnected(_) => exit_codes::SPAWN_FAILURE,
        }
    }
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
