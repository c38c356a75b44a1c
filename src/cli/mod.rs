//! CLI argument parsing for aichef-bridge.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// aichef-bridge: run recipe backend commands from the terminal.
///
/// Each invocation spawns the backend interpreter once, passes it a command
/// name and arguments, and decodes the single JSON object it prints.
#[derive(Parser, Debug)]
#[command(name = "aichef-bridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Project root containing the backend script (discovered when omitted).
    #[arg(long, global = true, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Bridge config file (defaults to aichef-bridge.yaml in the project root).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the decoded payload as JSON instead of formatted text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find recipes that use the given ingredients.
    Find(FindArgs),

    /// Generate a new recipe from a description.
    Generate(GenerateArgs),

    /// Show cooking tips for a recipe.
    Tips(TipsArgs),

    /// List every recipe the backend knows.
    Recipes,

    /// Send a command with raw arguments and print the untouched response.
    Raw(RawArgs),

    /// Show which interpreter would run the backend.
    Resolve,
}

/// Arguments for the `find` command.
#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Ingredients to match (e.g. egg flour "olive oil").
    #[arg(required = true)]
    pub ingredients: Vec<String>,
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Free-text description of the recipe to generate.
    pub prompt: String,
}

/// Arguments for the `tips` command.
#[derive(Parser, Debug)]
pub struct TipsArgs {
    /// Recipe name to get tips for.
    pub recipe: String,
}

/// Arguments for the `raw` command.
#[derive(Parser, Debug)]
pub struct RawArgs {
    /// Backend command name (find_recipes, generate_recipe, get_tips, get_all_recipes).
    pub command: String,

    /// Positional arguments passed through verbatim.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_find() {
        let cli = Cli::try_parse_from(["aichef-bridge", "find", "egg", "olive oil"]).unwrap();
        match cli.command {
            Command::Find(args) => assert_eq!(args.ingredients, vec!["egg", "olive oil"]),
            other => panic!("expected Find, got {:?}", other),
        }
    }

    #[test]
    fn test_find_requires_ingredients() {
        assert!(Cli::try_parse_from(["aichef-bridge", "find"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "aichef-bridge",
            "tips",
            "Pancakes",
            "--json",
            "-vv",
            "--project-root",
            "/srv/aichef",
        ])
        .unwrap();

        assert!(cli.global.json);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.project_root, Some(PathBuf::from("/srv/aichef")));
        assert!(matches!(cli.command, Command::Tips(_)));
    }

    #[test]
    fn test_parse_raw_passes_arguments_through() {
        let cli = Cli::try_parse_from(["aichef-bridge", "raw", "get_tips", "Crème brûlée", "extra"])
            .unwrap();
        match cli.command {
            Command::Raw(args) => {
                assert_eq!(args.command, "get_tips");
                assert_eq!(args.args, vec!["Crème brûlée", "extra"]);
            }
            other => panic!("expected Raw, got {:?}", other),
        }
    }
}
