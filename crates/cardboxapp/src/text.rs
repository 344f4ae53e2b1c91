//! # Ingredient and Instruction Text
//!
//! Ingredients are edited as free text, one per line. A line wrapped in the group
//! marker (`---Filling---`) opens a named group; every following line belongs to
//! that group until the next header. Lines before the first header stay
//! ungrouped.
//!
//! ```text
//! 500g flour
//! 2dl milk
//! ---Filling---
//! 100g sugar
//! ```
//!
//! parses into `["500g flour", "2dl milk", {Filling: ["100g sugar"]}]`.
//!
//! Groups that end up without items are dropped, so a header with nothing under
//! it disappears on save. Formatting is the inverse: reparsing formatted entries
//! yields the same entries.

use crate::model::{IngredientEntry, IngredientGroup};

pub const GROUP_MARKER: &str = "---";

/// Returns the group name if `line` is a group header.
pub fn group_header(line: &str) -> Option<&str> {
    if !(line.starts_with(GROUP_MARKER) && line.ends_with(GROUP_MARKER)) {
        return None;
    }
    // "---" and "-----" are headers with an empty name
    let inner = line
        .get(GROUP_MARKER.len()..line.len().saturating_sub(GROUP_MARKER.len()))
        .unwrap_or("");
    Some(inner.trim())
}

pub fn parse_ingredients(text: &str) -> Vec<IngredientEntry> {
    let mut entries = Vec::new();
    let mut current: Option<IngredientGroup> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(name) = group_header(line) {
            close_group(&mut entries, current.take());
            current = Some(IngredientGroup::new(name));
        } else if let Some(group) = current.as_mut() {
            group.items.push(line.to_string());
        } else {
            entries.push(IngredientEntry::Item(line.to_string()));
        }
    }
    close_group(&mut entries, current.take());

    entries
}

fn close_group(entries: &mut Vec<IngredientEntry>, group: Option<IngredientGroup>) {
    if let Some(group) = group.filter(|g| !g.items.is_empty()) {
        entries.push(IngredientEntry::Group(group));
    }
}

pub fn format_ingredients(entries: &[IngredientEntry]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for entry in entries {
        match entry {
            IngredientEntry::Item(item) => lines.push(item.clone()),
            IngredientEntry::Group(group) => {
                lines.push(format!("{}{}{}", GROUP_MARKER, group.name, GROUP_MARKER));
                lines.extend(group.items.iter().cloned());
            }
        }
    }
    lines.join("\n")
}

pub fn parse_instructions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

pub fn format_instructions(steps: &[String]) -> String {
    steps.join("\n")
}
