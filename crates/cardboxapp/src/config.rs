//! # Configuration
//!
//! Cardbox configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `CARDBOX__DEFAULT_SORT`, etc.
//! 2. **Data directory config**: `<data-dir>/cardbox.toml`.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_sort` | `alphabetical` | Sort order until one is picked with `cardbox sort` |
//! | `categories` | Bread, Pastry, Cake, ... | Category suggestions |
//! | `meals` | Breakfast, Lunch, Dinner, ... | Meal suggestions |
//! | `cuisines` | Norwegian, Italian, ... | Cuisine suggestions |

use crate::model::SortKey;
use confique::Config;
use log::warn;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "cardbox.toml";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_categories() -> Vec<String> {
    strings(&[
        "Bread",
        "Pastry",
        "Cake",
        "Gratin",
        "Stew",
        "Cookies",
        "Porridge",
        "Soup",
        "Salad",
        "Meatballs",
    ])
}

fn default_meals() -> Vec<String> {
    strings(&["Breakfast", "Lunch", "Dinner", "Dessert", "Snacks", "Side dish"])
}

fn default_cuisines() -> Vec<String> {
    strings(&[
        "Norwegian",
        "Italian",
        "Scandinavian",
        "International",
        "Asian",
        "Mexican",
        "French",
    ])
}

/// Configuration for cardbox, stored in `cardbox.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CardboxConfig {
    /// Sort order used until one is selected (alphabetical, person, source, date)
    #[config(default = "alphabetical")]
    pub default_sort: String,

    /// Category suggestions. When absent, a built-in list is used.
    pub categories: Option<Vec<String>>,

    /// Meal suggestions. When absent, a built-in list is used.
    pub meals: Option<Vec<String>>,

    /// Cuisine suggestions. When absent, a built-in list is used.
    pub cuisines: Option<Vec<String>>,
}

impl Default for CardboxConfig {
    fn default() -> Self {
        Self {
            default_sort: "alphabetical".to_string(),
            categories: None,
            meals: None,
            cuisines: None,
        }
    }
}

impl CardboxConfig {
    /// The configured default sort order; unknown values fall back to alphabetical.
    pub fn default_sort(&self) -> SortKey {
        self.default_sort.parse().unwrap_or_else(|e| {
            warn!("{} (using alphabetical)", e);
            SortKey::Alphabetical
        })
    }

    pub fn categories(&self) -> Vec<String> {
        self.categories.clone().unwrap_or_else(default_categories)
    }

    pub fn meals(&self) -> Vec<String> {
        self.meals.clone().unwrap_or_else(default_meals)
    }

    pub fn cuisines(&self) -> Vec<String> {
        self.cuisines.clone().unwrap_or_else(default_cuisines)
    }
}
