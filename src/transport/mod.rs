//! Request/response transports for backend commands.
//!
//! A transport turns one `CommandRequest` into one decoded `CommandResult`.
//! The bridge only talks to this trait, so the subprocess mechanics below can
//! be swapped for a socket, an in-process backend, or a test fake.
//!
//! - **Process**: one-shot interpreter invocation with captured output
//! - **Decode**: UTF-8 and JSON-object validation of captured bytes

mod decode;
mod process;

pub use decode::decode_output;
pub use process::{ProcessOutput, ProcessTransport};

use crate::command::{CommandRequest, CommandResult};
use crate::error::Result;

/// One request/response cycle against the backend.
///
/// Implementations must be safe to call from several threads at once; every
/// call is independent and shares no mutable state with any other call.
pub trait Transport: Send + Sync {
    /// Run `request` to completion and return the decoded response mapping.
    fn call(&self, request: &CommandRequest) -> Result<CommandResult>;
}
