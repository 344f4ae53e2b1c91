//! Plain-text recipe cards.
//!
//! ```text
//! Cinnamon buns
//! =============
//! Grandma's recipe • Baking book p.12
//! Servings: 12
//! Category: Pastry • Meal: Snacks
//!
//! Soft buns with a buttery filling.
//!
//! Ingredients
//!   • 500g flour
//!   Filling
//!   • 100g butter
//!
//! Instructions
//!   1. Make the dough.
//!   2. Bake.
//! ```

use crate::commands::CmdResult;
use crate::error::{CardboxError, Result};
use crate::form::FormState;
use crate::model::IngredientEntry;
use crate::repository::RecipeRepository;
use crate::session::EditSession;
use crate::store::DataStore;
use crate::text::{parse_ingredients, parse_instructions};
use unicode_width::UnicodeWidthStr;

/// Preview of the working form.
pub fn run(session: &EditSession) -> Result<CmdResult> {
    Ok(CmdResult::default().with_output(render_card(&session.form)?))
}

/// Preview of a saved recipe.
pub fn show<S: DataStore>(repo: &RecipeRepository<S>, id: &str) -> Result<CmdResult> {
    let recipe = repo
        .get(id)
        .ok_or_else(|| CardboxError::NotFound(id.to_string()))?;
    let card = render_card(&FormState::from_recipe(recipe))?;
    Ok(CmdResult::default().with_output(card))
}

pub fn render_card(form: &FormState) -> Result<String> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(CardboxError::Validation(
            "Enter a title to preview the recipe".to_string(),
        ));
    }

    let mut lines = vec![title.to_string(), "=".repeat(title.width().max(1))];

    let provider = form.provider.trim();
    let reference = form.reference.trim();
    let page = form.page_number.trim();
    let mut origin = Vec::new();
    if !provider.is_empty() {
        origin.push(format!("{}'s recipe", provider));
    }
    if !reference.is_empty() {
        if page.is_empty() {
            origin.push(reference.to_string());
        } else {
            origin.push(format!("{} p.{}", reference, page));
        }
    }
    if !origin.is_empty() {
        lines.push(origin.join(" • "));
    }

    let servings = form.servings.trim();
    if !servings.is_empty() {
        lines.push(format!("Servings: {}", servings));
    }

    let meta: Vec<String> = [
        ("Category", &form.category),
        ("Meal", &form.meal),
        ("Cuisine", &form.cuisine),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(label, value)| format!("{}: {}", label, value.trim()))
    .collect();
    if !meta.is_empty() {
        lines.push(meta.join(" • "));
    }

    let description = form.description.trim();
    if !description.is_empty() {
        lines.push(String::new());
        lines.push(description.to_string());
    }

    let image = form.image.trim();
    if !image.is_empty() {
        lines.push(String::new());
        lines.push(format!("Image: {}", image));
    }

    let ingredients = parse_ingredients(&form.ingredients);
    if !ingredients.is_empty() {
        lines.push(String::new());
        lines.push("Ingredients".to_string());
        for entry in &ingredients {
            match entry {
                IngredientEntry::Item(item) => lines.push(format!("  • {}", item)),
                IngredientEntry::Group(group) => {
                    lines.push(format!("  {}", group.name));
                    lines.extend(group.items.iter().map(|item| format!("  • {}", item)));
                }
            }
        }
    }

    let steps = parse_instructions(&form.instructions);
    if !steps.is_empty() {
        lines.push(String::new());
        lines.push("Instructions".to_string());
        lines.extend(
            steps
                .iter()
                .enumerate()
                .map(|(i, step)| format!("  {}. {}", i + 1, step)),
        );
    }

    Ok(lines.join("\n"))
}
