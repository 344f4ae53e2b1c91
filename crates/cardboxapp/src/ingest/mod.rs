//! # Recipe Ingestion
//!
//! Turns pasted recipe data into a filled-in [`FormState`]. The text usually
//! comes from an AI chat or a hand-edited export, so it is rarely clean JSON.
//! Attempts run in order and the first success wins:
//!
//! 1. strict JSON;
//! 2. a single wrapping key (`recipe: {...}`) is stripped and strict JSON retried;
//! 3. light normalization (quote bare keys, single to double quotes, drop
//!    trailing commas) and strict JSON retried;
//! 4. the [`relaxed`] object-notation parser.
//!
//! A single-key object whose value is an object is unwrapped. Any `id` in the
//! data is dropped; the caller passes the id of the recipe being edited, if any,
//! so the next save updates it instead of creating a copy.
//!
//! Failure leaves everything untouched and reports the last parser's message.

pub mod relaxed;

use crate::error::{CardboxError, Result};
use crate::form::FormState;
use crate::model::{IngredientEntry, IngredientGroup};
use crate::text::format_ingredients;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static WRAPPER_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^["']?[\w_]+["']?\s*:\s*(\{[\s\S]*\})\s*$"#).expect("wrapper pattern")
});
static BARE_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+):").expect("bare key pattern"));
static SINGLE_QUOTED_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\s*'([^']*)'").expect("single quote pattern"));
static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern"));

/// Prefix marking a comment line inside an ingredient list.
const COMMENT_PREFIX: &str = "//";

/// Parses pasted recipe data into a form.
///
/// `active_id` is reattached to the result; pass it only when it names a saved
/// recipe.
pub fn ingest(raw: &str, active_id: Option<&str>) -> Result<FormState> {
    let value = parse_loose(raw)?;
    let Value::Object(mut fields) = unwrap_wrapper(value) else {
        return Err(CardboxError::Parse(
            "Expected a recipe object".to_string(),
        ));
    };
    fields.remove("id");

    let mut form = form_from_fields(&fields);
    if let Some(id) = active_id {
        form.recipe_id = id.to_string();
    }
    Ok(form)
}

/// Runs the fallback chain and returns the first value any step produced.
pub fn parse_loose(raw: &str) -> Result<Value> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(CardboxError::Parse("Nothing to parse".to_string()));
    }

    match serde_json::from_str(input) {
        Ok(value) => return Ok(value),
        Err(e) => debug!("strict JSON failed: {}", e),
    }

    let payload = match WRAPPER_KEY.captures(input).and_then(|c| c.get(1)) {
        Some(inner) => {
            let inner = inner.as_str();
            match serde_json::from_str(inner) {
                Ok(value) => return Ok(value),
                Err(e) => debug!("strict JSON on unwrapped payload failed: {}", e),
            }
            inner
        }
        None => input,
    };

    let normalized = normalize(payload);
    match serde_json::from_str(&normalized) {
        Ok(value) => return Ok(value),
        Err(e) => debug!("strict JSON after normalization failed: {}", e),
    }

    relaxed::parse(payload).map_err(|e| CardboxError::Parse(e.to_string()))
}

fn normalize(input: &str) -> String {
    let quoted_keys = BARE_KEY.replace_all(input, "\"${1}\":");
    let double_quoted = SINGLE_QUOTED_VALUE.replace_all(&quoted_keys, ":\"${1}\"");
    TRAILING_COMMA
        .replace_all(&double_quoted, "${1}")
        .into_owned()
}

fn unwrap_wrapper(value: Value) -> Value {
    match value {
        Value::Object(map) if map.len() == 1 && map.values().all(Value::is_object) => map
            .into_iter()
            .next()
            .map(|(_, inner)| inner)
            .unwrap_or(Value::Null),
        other => other,
    }
}

fn form_from_fields(fields: &Map<String, Value>) -> FormState {
    let text = |key: &str| scalar_text(fields.get(key));
    FormState {
        recipe_id: String::new(),
        title: text("title"),
        provider: text("provider"),
        reference: text("reference"),
        page_number: text("pageNumber"),
        servings: text("servings"),
        category: text("category"),
        meal: text("meal"),
        cuisine: text("cuisine"),
        description: text("description"),
        image: text("image"),
        ingredients: ingredients_text(fields.get("ingredients")),
        instructions: instructions_text(fields.get("instructions")),
    }
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

fn ingredients_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => format_ingredients(&entries_from_list(items)),
        Some(Value::Object(groups)) => format_ingredients(&entries_from_map(groups)),
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    }
}

fn entries_from_list(items: &[Value]) -> Vec<IngredientEntry> {
    let mut entries = Vec::new();
    for item in items {
        match item {
            Value::String(line) if line.trim_start().starts_with(COMMENT_PREFIX) => {}
            Value::Object(fields) => {
                if let Some(group) = group_from_fields(fields) {
                    entries.push(IngredientEntry::Group(group));
                }
            }
            other => {
                let line = scalar_text(Some(other));
                if !line.trim().is_empty() {
                    entries.push(IngredientEntry::Item(line));
                }
            }
        }
    }
    entries
}

fn group_from_fields(fields: &Map<String, Value>) -> Option<IngredientGroup> {
    let name = fields
        .get("group")
        .or_else(|| fields.get("name"))
        .and_then(Value::as_str)?;
    let items = fields.get("items").and_then(Value::as_array)?;
    Some(IngredientGroup {
        name: name.to_string(),
        items: item_lines(items),
    })
}

/// `{ "dough": [...], "filling": [...] }`: each key becomes a capitalized group.
fn entries_from_map(groups: &Map<String, Value>) -> Vec<IngredientEntry> {
    groups
        .iter()
        .filter_map(|(key, items)| {
            let items = item_lines(items.as_array()?);
            (!items.is_empty()).then(|| {
                IngredientEntry::Group(IngredientGroup {
                    name: capitalize(key),
                    items,
                })
            })
        })
        .collect()
}

fn item_lines(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|item| scalar_text(Some(item)))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

fn instructions_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(steps)) => steps
            .iter()
            .map(|step| scalar_text(Some(step)))
            .collect::<Vec<_>>()
            .join("\n"),
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
