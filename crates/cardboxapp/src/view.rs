//! # Sorting and List Projection
//!
//! Orders recipes for display and attaches the annotation each sort order shows
//! next to a title.
//!
//! | Key | Order | Annotation |
//! |-----|-------|------------|
//! | `alphabetical` | title | category, meal |
//! | `person` | provider (missing last), title | provider |
//! | `source` | reference (missing last), page (missing last), title | reference and page |
//! | `date` | created date, newest first (missing = 1970-01-01), title | created date |
//!
//! Text comparison folds case first and falls back to the exact text, so
//! "apple" and "Apple" sort together. The chain always ends with the id to keep
//! the order total.

use crate::config::CardboxConfig;
use crate::model::{Recipe, SortKey};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// A recipe as the list shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub meta: Vec<String>,
    pub active: bool,
}

pub fn text_cmp(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<String>();
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

/// Present values first, then missing ones.
fn missing_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => text_cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub fn compare(a: &Recipe, b: &Recipe, key: SortKey) -> Ordering {
    let by_title = || text_cmp(&a.title, &b.title);
    let primary = match key {
        SortKey::Alphabetical => by_title(),
        SortKey::Person => missing_last(a.provider(), b.provider()).then_with(by_title),
        SortKey::Source => missing_last(a.reference(), b.reference())
            .then_with(|| {
                let page = |r: &Recipe| r.page_number.unwrap_or(i64::MAX);
                page(a).cmp(&page(b))
            })
            .then_with(by_title),
        SortKey::Date => {
            let date = |r: &Recipe| r.created_at.unwrap_or_else(epoch);
            date(b).cmp(&date(a)).then_with(by_title)
        }
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

pub fn sorted_view<'a, I>(records: I, key: SortKey) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut sorted: Vec<&Recipe> = records.into_iter().collect();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

/// The annotation shown beside a title for the given sort order.
pub fn annotate(recipe: &Recipe, key: SortKey) -> Vec<String> {
    match key {
        SortKey::Person => recipe.provider().map(String::from).into_iter().collect(),
        SortKey::Source => match (recipe.reference(), recipe.page_number) {
            (Some(reference), Some(page)) => vec![format!("{} p.{}", reference, page)],
            (Some(reference), None) => vec![reference.to_string()],
            (None, Some(page)) => vec![format!("p.{}", page)],
            (None, None) => Vec::new(),
        },
        SortKey::Date => recipe
            .created_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .into_iter()
            .collect(),
        SortKey::Alphabetical => [recipe.category(), recipe.meal()]
            .into_iter()
            .flatten()
            .map(String::from)
            .collect(),
    }
}

pub fn project<'a, I>(records: I, key: SortKey, active_id: Option<&str>) -> Vec<RecipeView>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    sorted_view(records, key)
        .into_iter()
        .map(|recipe| RecipeView {
            meta: annotate(recipe, key),
            active: active_id == Some(recipe.id.as_str()),
            recipe: recipe.clone(),
        })
        .collect()
}

/// Values offered while typing category, meal and cuisine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub categories: Vec<String>,
    pub meals: Vec<String>,
    pub cuisines: Vec<String>,
}

/// Configured defaults followed by values already in use, first-seen order.
pub fn suggestions<'a, I>(records: I, config: &CardboxConfig) -> Suggestions
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut out = Suggestions {
        categories: config.categories(),
        meals: config.meals(),
        cuisines: config.cuisines(),
    };
    let mut records: Vec<&Recipe> = records.into_iter().collect();
    // oldest first, so values appear in the order they were introduced
    records.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| text_cmp(&a.title, &b.title))
    });

    for recipe in records {
        push_unique(&mut out.categories, recipe.category());
        push_unique(&mut out.meals, recipe.meal());
        push_unique(&mut out.cuisines, recipe.cuisine());
    }
    out
}

fn push_unique(list: &mut Vec<String>, value: Option<&str>) {
    if let Some(value) = value.map(str::trim) {
        if !list.iter().any(|existing| existing == value) {
            list.push(value.to_string());
        }
    }
}
