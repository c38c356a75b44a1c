//! Text rendering for command output.
//!
//! Pure functions returning strings so the layout can be tested without
//! capturing stdout.

use crate::recipe::RecipeRecord;
use crate::resolver::ResolvedExecutable;
use std::fmt::Write;

/// Render a list of recipes as a summary block per recipe.
pub fn recipe_list(records: &[RecipeRecord]) -> String {
    if records.is_empty() {
        return "No recipes found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Found {} recipe(s):", records.len());
    for record in records {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", record.name);
        let _ = writeln!(out, "    Cook time:   {}", record.cook_time);
        let _ = writeln!(out, "    Difficulty:  {}", record.difficulty);
        if !record.tags.is_empty() {
            let _ = writeln!(out, "    Tags:        {}", record.tags.join(", "));
        }
    }
    out
}

/// Render one recipe with its ingredients and numbered instructions.
pub fn recipe_detail(record: &RecipeRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", record.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Cook time:   {}", record.cook_time);
    let _ = writeln!(out, "  Difficulty:  {}", record.difficulty);

    if !record.ingredients.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Ingredients:");
        for ingredient in &record.ingredients {
            let _ = writeln!(out, "  - {}", ingredient);
        }
    }

    if !record.instructions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Instructions:");
        for (i, step) in record.instructions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, step);
        }
    }

    if !record.tags.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Tags: {}", record.tags.join(", "));
    }
    out
}

/// Render tips as a bulleted list.
pub fn tips(recipe: &str, tips: &[String]) -> String {
    if tips.is_empty() {
        return "No tips available.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Tips for {}:", recipe);
    for tip in tips {
        let _ = writeln!(out, "  - {}", tip);
    }
    out
}

/// Render the interpreter resolution result.
pub fn resolution(executable: &ResolvedExecutable, script: &std::path::Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Interpreter: {}", executable.path.display());
    let _ = writeln!(out, "  Source:      {}", executable.source);
    let _ = writeln!(out, "  Script:      {}", script.display());
    if !script.is_file() {
        let _ = writeln!(out, "  Warning:     script not found");
    }
    out
}
