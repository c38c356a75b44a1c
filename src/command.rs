//! Commands understood by the recipe backend.
//!
//! A request is a command name plus positional string arguments; a result is
//! the single JSON object the backend printed, kept untyped until one of the
//! decoders in `response` picks it apart.

use crate::error::{BridgeError, Result};
use serde_json::{Map, Value};
use std::fmt;

/// Untyped response mapping decoded from the backend's output.
pub type CommandResult = Map<String, Value>;

/// The four operations the backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeCommand {
    /// Match recipes against an ingredient list.
    FindRecipes,
    /// Generate a new recipe from a free-text prompt.
    GenerateRecipe,
    /// Fetch cooking tips for a named recipe.
    GetTips,
    /// List every recipe the backend knows.
    GetAllRecipes,
}

impl BridgeCommand {
    /// All commands, in wire order.
    pub const ALL: [BridgeCommand; 4] = [
        BridgeCommand::FindRecipes,
        BridgeCommand::GenerateRecipe,
        BridgeCommand::GetTips,
        BridgeCommand::GetAllRecipes,
    ];

    /// Name passed to the backend as its first argument after the script.
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeCommand::FindRecipes => "find_recipes",
            BridgeCommand::GenerateRecipe => "generate_recipe",
            BridgeCommand::GetTips => "get_tips",
            BridgeCommand::GetAllRecipes => "get_all_recipes",
        }
    }

    /// Parse a wire name. Unknown names return `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.as_str() == name)
    }
}

impl fmt::Display for BridgeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub command: BridgeCommand,
    /// Positional arguments appended after the command name.
    pub arguments: Vec<String>,
}

impl CommandRequest {
    /// Build a request from a command and raw arguments.
    pub fn new(command: BridgeCommand, arguments: Vec<String>) -> Self {
        Self { command, arguments }
    }

    /// `find_recipes` with the ingredient list JSON-encoded into one argument.
    pub fn find_recipes<S: AsRef<str>>(ingredients: &[S]) -> Result<Self> {
        let ingredients: Vec<&str> = ingredients.iter().map(AsRef::as_ref).collect();
        let encoded = serde_json::to_string(&ingredients).map_err(|e| {
            BridgeError::UserError(format!("failed to encode ingredient list: {}", e))
        })?;
        Ok(Self::new(BridgeCommand::FindRecipes, vec![encoded]))
    }

    /// `generate_recipe` with a free-text prompt.
    pub fn generate_recipe(prompt: &str) -> Self {
        Self::new(BridgeCommand::GenerateRecipe, vec![prompt.to_string()])
    }

    /// `get_tips` for a recipe name.
    pub fn get_tips(recipe_name: &str) -> Self {
        Self::new(BridgeCommand::GetTips, vec![recipe_name.to_string()])
    }

    /// `get_all_recipes`, which takes no arguments.
    pub fn get_all_recipes() -> Self {
        Self::new(BridgeCommand::GetAllRecipes, Vec::new())
    }

    /// Argument vector handed to the interpreter: script, command, arguments.
    pub fn argv(&self, script_path: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.arguments.len() + 2);
        argv.push(script_path.to_string());
        argv.push(self.command.as_str().to_string());
        argv.extend(self.arguments.iter().cloned());
        argv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        assert_eq!(BridgeCommand::FindRecipes.as_str(), "find_recipes");
        assert_eq!(BridgeCommand::GenerateRecipe.as_str(), "generate_recipe");
        assert_eq!(BridgeCommand::GetTips.as_str(), "get_tips");
        assert_eq!(BridgeCommand::GetAllRecipes.as_str(), "get_all_recipes");
    }

    #[test]
    fn test_parse_roundtrips_every_command() {
        for cmd in BridgeCommand::ALL {
            assert_eq!(BridgeCommand::parse(cmd.as_str()), Some(cmd));
            assert_eq!(cmd.to_string(), cmd.as_str());
        }
        assert_eq!(BridgeCommand::parse("plan_meals"), None);
        assert_eq!(BridgeCommand::parse("FIND_RECIPES"), None);
    }

    #[test]
    fn test_find_recipes_double_encodes_ingredients() {
        let request = CommandRequest::find_recipes(&["egg", "flour"]).unwrap();
        assert_eq!(request.command, BridgeCommand::FindRecipes);
        assert_eq!(request.arguments, vec![r#"["egg","flour"]"#.to_string()]);
    }

    #[test]
    fn test_find_recipes_encoding_preserves_awkward_strings() {
        let ingredients = vec![
            "salt, pepper".to_string(),
            "  olive oil ".to_string(),
            "\"fancy\" cheese".to_string(),
            "crème fraîche".to_string(),
        ];
        let request = CommandRequest::find_recipes(&ingredients).unwrap();

        let decoded: Vec<String> = serde_json::from_str(&request.arguments[0]).unwrap();
        assert_eq!(decoded, ingredients);
    }

    #[test]
    fn test_find_recipes_empty_list() {
        let request = CommandRequest::find_recipes::<&str>(&[]).unwrap();
        assert_eq!(request.arguments, vec!["[]".to_string()]);
    }

    #[test]
    fn test_argv_layout() {
        let request = CommandRequest::get_tips("Pancakes");
        assert_eq!(
            request.argv("/srv/app_bridge.py"),
            vec!["/srv/app_bridge.py", "get_tips", "Pancakes"]
        );

        let request = CommandRequest::get_all_recipes();
        assert_eq!(
            request.argv("app_bridge.py"),
            vec!["app_bridge.py", "get_all_recipes"]
        );
    }

    #[test]
    fn test_generate_recipe_keeps_prompt_verbatim() {
        let request = CommandRequest::generate_recipe("spicy vegan curry; under 30 min");
        assert_eq!(request.arguments, vec!["spicy vegan curry; under 30 min"]);
    }
}
