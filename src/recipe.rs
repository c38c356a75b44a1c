//! Recipe records built from backend mappings.
//!
//! The backend is loosely typed, so a record is only produced when the one
//! required field, `name`, is a string. Everything else falls back to a
//! display default.

use crate::response::string_list;
use serde::Serialize;
use serde_json::{Map, Value};

/// Shown when `cook_time` or `difficulty` is absent.
pub const UNKNOWN: &str = "Unknown";

/// A recipe as a front-end displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeRecord {
    pub name: String,
    pub cook_time: String,
    pub difficulty: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
}

impl RecipeRecord {
    /// Project a backend mapping into a record.
    ///
    /// Returns `None` when `name` is missing or not a string, so an empty
    /// `{}` from `generate_recipe` is never mistaken for a usable recipe.
    pub fn from_map(map: &Map<String, Value>) -> Option<Self> {
        let name = map.get("name")?.as_str()?.to_string();

        Some(Self {
            name,
            cook_time: map
                .get("cook_time")
                .and_then(cook_time_text)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            difficulty: map
                .get("difficulty")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            ingredients: list_field(map, "ingredients"),
            instructions: list_field(map, "instructions"),
            tags: list_field(map, "tags"),
        })
    }
}

/// Build records from a decoded list, dropping entries without a name.
pub fn records_from_list(maps: &[Map<String, Value>]) -> Vec<RecipeRecord> {
    maps.iter().filter_map(RecipeRecord::from_map).collect()
}

// The bundled backend reports minutes as an integer; generated recipes use text.
fn cook_time_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn list_field(map: &Map<String, Value>, key: &str) -> Vec<String> {
    map.get(key).and_then(string_list).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_full_record() {
        let record = RecipeRecord::from_map(&map(json!({
            "name": "Pancakes",
            "cook_time": "20 minutes",
            "difficulty": "Easy",
            "ingredients": ["egg", "flour", "milk"],
            "instructions": ["Mix", "Fry"],
            "tags": ["breakfast"]
        })))
        .unwrap();

        assert_eq!(record.name, "Pancakes");
        assert_eq!(record.cook_time, "20 minutes");
        assert_eq!(record.difficulty, "Easy");
        assert_eq!(record.ingredients, vec!["egg", "flour", "milk"]);
        assert_eq!(record.instructions, vec!["Mix", "Fry"]);
        assert_eq!(record.tags, vec!["breakfast"]);
    }

    #[test]
    fn test_missing_name_is_not_a_record() {
        assert!(RecipeRecord::from_map(&map(json!({}))).is_none());
        assert!(RecipeRecord::from_map(&map(json!({"cook_time": "5"}))).is_none());
        assert!(RecipeRecord::from_map(&map(json!({"name": 7}))).is_none());
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let record = RecipeRecord::from_map(&map(json!({"name": "Toast"}))).unwrap();

        assert_eq!(record.cook_time, UNKNOWN);
        assert_eq!(record.difficulty, UNKNOWN);
        assert!(record.ingredients.is_empty());
        assert!(record.instructions.is_empty());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_numeric_cook_time() {
        let record =
            RecipeRecord::from_map(&map(json!({"name": "Stir Fry", "cook_time": 25}))).unwrap();
        assert_eq!(record.cook_time, "25");
    }

    #[test]
    fn test_mistyped_lists_are_empty() {
        let record = RecipeRecord::from_map(&map(json!({
            "name": "Salad",
            "ingredients": "lettuce, tomato",
            "tags": ["fresh", 1]
        })))
        .unwrap();

        assert!(record.ingredients.is_empty());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_records_from_list_drops_unnamed() {
        let maps = vec![
            map(json!({"name": "Pancakes"})),
            map(json!({"title": "Nameless"})),
            map(json!({"name": "Omelette"})),
        ];

        let names: Vec<_> = records_from_list(&maps).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Pancakes", "Omelette"]);
    }
}
