//! Exit code constants for the aichef-bridge CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Backend could not be spawned
//! - 3: Backend output could not be decoded
//! - 4: Backend exceeded its deadline or output cap
//! - 5: Backend exited with a failure status (strict mode only)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The backend interpreter could not be started.
pub const SPAWN_FAILURE: i32 = 2;

/// The backend produced output that is not a single UTF-8 JSON object.
pub const DECODE_FAILURE: i32 = 3;

/// The backend ran past the configured deadline or output cap.
pub const LIMIT_EXCEEDED: i32 = 4;

/// The backend exited non-zero while `exit_status: require_success` is set.
pub const BACKEND_FAILURE: i32 = 5;
