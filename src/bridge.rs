//! The command bridge handle.
//!
//! A `Bridge` is an explicit, cloneable value wrapping a [`Transport`]. It
//! offers one typed method per backend command plus background dispatch for
//! callers that must not block their UI thread. Nothing is shared between
//! calls except the immutable transport, so any number of calls may run at
//! once.

use crate::command::{BridgeCommand, CommandRequest, CommandResult};
use crate::config::BridgeConfig;
use crate::context::ProjectLayout;
use crate::error::{BridgeError, Result};
use crate::recipe::{RecipeRecord, records_from_list};
use crate::response::{
    Decoded, DecodedTips, Envelope, decode_recipe, decode_recipe_list, decode_tips,
};
use crate::transport::{ProcessTransport, Transport};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

/// Response to `find_recipes` and `get_all_recipes`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeListResponse {
    pub recipes: Decoded<Vec<Map<String, Value>>>,
    pub envelope: Envelope,
}

impl RecipeListResponse {
    fn from_result(result: &CommandResult) -> Self {
        Self {
            recipes: decode_recipe_list(result),
            envelope: Envelope::from_result(result),
        }
    }

    /// Raw recipe mappings (empty when the field was missing or malformed).
    pub fn recipes(&self) -> &[Map<String, Value>] {
        &self.recipes.value
    }

    /// Recipes that carry a name, projected for display.
    pub fn records(&self) -> Vec<RecipeRecord> {
        records_from_list(&self.recipes.value)
    }
}

/// Response to `generate_recipe`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRecipeResponse {
    pub recipe: Decoded<Map<String, Value>>,
    pub envelope: Envelope,
}

impl GeneratedRecipeResponse {
    fn from_result(result: &CommandResult) -> Self {
        Self {
            recipe: decode_recipe(result),
            envelope: Envelope::from_result(result),
        }
    }

    /// Raw recipe mapping (empty when the field was missing or malformed).
    pub fn recipe(&self) -> &Map<String, Value> {
        &self.recipe.value
    }

    /// The generated recipe, if it has the required `name`.
    pub fn record(&self) -> Option<RecipeRecord> {
        RecipeRecord::from_map(&self.recipe.value)
    }
}

/// Response to `get_tips`.
#[derive(Debug, Clone, PartialEq)]
pub struct TipsResponse {
    pub tips: DecodedTips,
    pub envelope: Envelope,
}

impl TipsResponse {
    fn from_result(result: &CommandResult) -> Self {
        Self {
            tips: decode_tips(result),
            envelope: Envelope::from_result(result),
        }
    }

    pub fn tips(&self) -> &[String] {
        &self.tips.tips
    }
}

/// Handle to the recipe backend.
#[derive(Debug)]
pub struct Bridge<T: Transport = ProcessTransport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for Bridge<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl Bridge<ProcessTransport> {
    /// Build a subprocess-backed bridge for a project.
    ///
    /// When `project_root` is `None` the root is discovered from the bridge's
    /// installation location (see [`ProjectLayout::discover_root`]).
    pub fn from_config(project_root: Option<&Path>, config: &BridgeConfig) -> Result<Self> {
        config.validate()?;
        let layout = ProjectLayout::resolve(project_root, config)?;
        Ok(Self::with_transport(ProcessTransport::new(layout, config)))
    }
}

impl<T: Transport + 'static> Bridge<T> {
    /// Wrap any transport, e.g. a fake backend in tests.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one raw request/response cycle.
    pub fn execute(&self, command: BridgeCommand, arguments: Vec<String>) -> Result<CommandResult> {
        self.call(&CommandRequest::new(command, arguments))
    }

    /// Run a prepared request.
    pub fn call(&self, request: &CommandRequest) -> Result<CommandResult> {
        self.transport.call(request)
    }

    /// Find recipes matching an ingredient list.
    pub fn find_recipes<S: AsRef<str>>(&self, ingredients: &[S]) -> Result<RecipeListResponse> {
        let result = self.call(&CommandRequest::find_recipes(ingredients)?)?;
        Ok(RecipeListResponse::from_result(&result))
    }

    /// Generate a recipe from a free-text prompt.
    ///
    /// Success does not imply a usable recipe: check [`GeneratedRecipeResponse::record`].
    pub fn generate_recipe(&self, prompt: &str) -> Result<GeneratedRecipeResponse> {
        let result = self.call(&CommandRequest::generate_recipe(prompt))?;
        Ok(GeneratedRecipeResponse::from_result(&result))
    }

    /// Fetch cooking tips for a recipe.
    pub fn get_tips(&self, recipe_name: &str) -> Result<TipsResponse> {
        let result = self.call(&CommandRequest::get_tips(recipe_name))?;
        Ok(TipsResponse::from_result(&result))
    }

    /// List every recipe the backend knows.
    pub fn get_all_recipes(&self) -> Result<RecipeListResponse> {
        let result = self.call(&CommandRequest::get_all_recipes())?;
        Ok(RecipeListResponse::from_result(&result))
    }

    /// Run `request` on a background thread.
    ///
    /// The result is delivered exactly once through the returned
    /// [`PendingCall`], which the caller polls or waits on from whichever
    /// thread it treats as its main context.
    pub fn dispatch(&self, request: CommandRequest) -> PendingCall {
        let (sender, receiver) = mpsc::channel();
        let command = request.command;
        self.dispatch_with(request, move |result| {
            // The caller may have dropped its PendingCall; nobody is listening then.
            let _ = sender.send(result);
        });
        PendingCall { command, receiver }
    }

    /// Run `request` on a background thread and hand the result to `on_complete`
    /// on that same thread.
    pub fn dispatch_with<F>(&self, request: CommandRequest, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<CommandResult>) + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        thread::spawn(move || {
            tracing::debug!(command = %request.command, "background call started");
            on_complete(transport.call(&request));
        })
    }
}

/// Result of a background call that has not been collected yet.
#[derive(Debug)]
pub struct PendingCall {
    command: BridgeCommand,
    receiver: Receiver<Result<CommandResult>>,
}

impl PendingCall {
    pub fn command(&self) -> BridgeCommand {
        self.command
    }

    /// Take the result if the call has finished, without blocking.
    ///
    /// Returns `None` while the backend is still running.
    pub fn try_take(&self) -> Option<Result<CommandResult>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(self.disconnected())),
        }
    }

    /// Block until the call finishes.
    pub fn wait(self) -> Result<CommandResult> {
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(self.disconnected()))
    }

    fn disconnected(&self) -> BridgeError {
        BridgeError::Disconnected(format!(
            "worker for '{}' exited without a result",
            self.command
        ))
    }
}
