//! aichef-bridge: subprocess command bridge to the recipe backend.
//!
//! A front-end issues one of four named commands; the bridge resolves an
//! interpreter, runs the backend script once with the command and its
//! arguments, and decodes the single JSON object the backend prints.
//!
//! ```no_run
//! use aichef_bridge::{Bridge, BridgeConfig};
//!
//! let bridge = Bridge::from_config(None, &BridgeConfig::default())?;
//! let response = bridge.find_recipes(&["egg", "flour"])?;
//! for recipe in response.records() {
//!     println!("{} ({})", recipe.name, recipe.cook_time);
//! }
//! # Ok::<(), aichef_bridge::BridgeError>(())
//! ```

pub mod bridge;
pub mod cli;
pub mod command;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod recipe;
pub mod resolver;
pub mod response;
pub mod transport;

#[cfg(test)]
mod test_support;

// Re-export public API
pub use bridge::{Bridge, GeneratedRecipeResponse, PendingCall, RecipeListResponse, TipsResponse};
pub use command::{BridgeCommand, CommandRequest, CommandResult};
pub use config::BridgeConfig;
pub use context::ProjectLayout;
pub use error::{BridgeError, Result};
pub use recipe::RecipeRecord;
pub use resolver::{ExecutableResolver, ResolutionSource, ResolvedExecutable};
pub use transport::{ProcessTransport, Transport};
