//! Field-fallback decoding of backend responses.
//!
//! Each command has a dedicated decoder that looks only at the keys it
//! expects. Missing or mistyped fields never fail a call: the decoded value
//! falls back to an empty default and the accompanying [`FieldState`] records
//! why, so callers that care can tell "no data" apart from "malformed".

use crate::command::CommandResult;
use serde_json::{Map, Value};

/// Key holding the recipe list for `find_recipes` and `get_all_recipes`.
pub const RECIPES_KEY: &str = "recipes";

/// Key holding the generated recipe for `generate_recipe`.
pub const RECIPE_KEY: &str = "recipe";

/// Primary key for `get_tips`: a string list or newline-delimited text.
pub const TIPS_KEY: &str = "tips";

/// Fallback key for `get_tips`: newline-delimited text.
pub const TIPS_TEXT_KEY: &str = "tips_text";

/// How an expected field was found in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// The field was present with the expected shape.
    Present,
    /// The field was absent.
    Missing,
    /// The field was present with an unexpected shape.
    WrongType,
}

/// A decoded field together with how it was obtained.
///
/// `value` is always the empty default unless `state` is `Present`.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub state: FieldState,
}

impl<T: Default> Decoded<T> {
    fn present(value: T) -> Self {
        Self {
            value,
            state: FieldState::Present,
        }
    }

    fn fallback(state: FieldState) -> Self {
        Self {
            value: T::default(),
            state,
        }
    }

    /// Whether the field was found with the expected shape.
    pub fn is_present(&self) -> bool {
        self.state == FieldState::Present
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Decode the `recipes` list.
///
/// The value must be an array of objects. A single non-object element makes
/// the whole list `WrongType`; partial lists are never returned.
pub fn decode_recipe_list(result: &CommandResult) -> Decoded<Vec<Map<String, Value>>> {
    let Some(value) = result.get(RECIPES_KEY) else {
        return Decoded::fallback(FieldState::Missing);
    };

    let Some(items) = value.as_array() else {
        return Decoded::fallback(FieldState::WrongType);
    };

    let recipes: Option<Vec<_>> = items.iter().map(|item| item.as_object().cloned()).collect();
    match recipes {
        Some(recipes) => Decoded::present(recipes),
        None => Decoded::fallback(FieldState::WrongType),
    }
}

/// Decode the generated `recipe` object.
///
/// `null`, which the backend emits when generation fails, counts as `WrongType`.
pub fn decode_recipe(result: &CommandResult) -> Decoded<Map<String, Value>> {
    match result.get(RECIPE_KEY) {
        None => Decoded::fallback(FieldState::Missing),
        Some(Value::Object(recipe)) => Decoded::present(recipe.clone()),
        Some(_) => Decoded::fallback(FieldState::WrongType),
    }
}

/// Which response shape produced the tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipsSource {
    /// `tips` was an array of strings.
    List,
    /// `tips` was newline-delimited text.
    Text,
    /// `tips_text` was newline-delimited text.
    TipsText,
    /// None of the shapes matched.
    Missing,
}

/// Tips decoded through the fallback cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTips {
    pub tips: Vec<String>,
    pub source: TipsSource,
}

/// Decode cooking tips.
///
/// Shapes are tried in a fixed order, first match wins:
/// 1. `tips` as an array whose every element is a string (returned as-is)
/// 2. `tips` as a string
/// 3. `tips_text` as a string
///
/// The string forms are split into trimmed, non-empty lines.
pub fn decode_tips(result: &CommandResult) -> DecodedTips {
    let tips = result.get(TIPS_KEY);

    if let Some(list) = tips.and_then(string_list) {
        return DecodedTips {
            tips: list,
            source: TipsSource::List,
        };
    }

    if let Some(Value::String(text)) = tips {
        return DecodedTips {
            tips: split_lines(text),
            source: TipsSource::Text,
        };
    }

    if let Some(Value::String(text)) = result.get(TIPS_TEXT_KEY) {
        return DecodedTips {
            tips: split_lines(text),
            source: TipsSource::TipsText,
        };
    }

    DecodedTips {
        tips: Vec::new(),
        source: TipsSource::Missing,
    }
}

/// Split newline-delimited text into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// An array whose every element is a string, or `None`.
pub(crate) fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Conventional status fields the backend adds to every response.
///
/// Purely informational: an `"error"` status is reported here but never
/// turns a call into a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub status: Option<String>,
    pub message: Option<String>,
    pub count: Option<u64>,
}

impl Envelope {
    /// Read `status`, `message` and `count`; mistyped values are treated as absent.
    pub fn from_result(result: &CommandResult) -> Self {
        Self {
            status: result.get("status").and_then(Value::as_str).map(str::to_string),
            message: result.get("message").and_then(Value::as_str).map(str::to_string),
            count: result.get("count").and_then(Value::as_u64),
        }
    }

    /// Whether the backend reported `"status": "error"`.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}
