//! Prompts for AI tools: a template asking for recipe JSON that `paste` can read
//! back, and an image-generation prompt describing the dish in the form.

use crate::commands::CmdResult;
use crate::config::CardboxConfig;
use crate::error::{CardboxError, Result};
use crate::model::IngredientEntry;
use crate::session::EditSession;
use crate::text::{parse_ingredients, parse_instructions};
use serde_json::json;

const TEMPLATE_INTRO: &str = "Read the attached recipe (photo, scan or text) and interpret as much of it as you can. \
Use well-known recipes of the same kind to fill gaps, and modernize old measures and wording. \
Then convert the recipe into a JSON object with exactly this format:";

const TEMPLATE_NOTES: &str = "IMPORTANT:
- title and servings are REQUIRED; every other field is optional
- leave out fields you cannot fill in
- mark tips in the instructions with \"TIP: \" at the start of the line
- ingredients can be grouped with objects as shown in the example
- reply with the JSON object only";

const IMAGE_INTRO: &str = "Generate a high-quality advertisement image for a food presentation. \
The image should be a close-up shot at a 40-degree angle of a well-decorated and dramatically lit table, \
where the ready food product is the main focus point. Use welcoming colors that give a cozy, presenting vibe. \
Create a professional food photography style image with beautiful lighting and composition. \
Pay close attention to the dish's ingredients, procedure and typical design when composing the image.";

const IMAGE_OUTRO: &str = "The final dish should look appetizing, fresh, and professionally plated. \
Include appropriate table settings, garnishes, and background elements that complement the dish without overwhelming it. \
The lighting should be warm and inviting, highlighting the textures and colors of the food. \
The image should be widescreen. The image should contain no recipes and no text.";

const NOT_SPECIFIED: &str = "Not specified";

fn examples(values: &[String]) -> String {
    values
        .iter()
        .take(4)
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The recipe JSON template, with field hints drawn from the configured suggestions.
pub fn template_json(config: &CardboxConfig) -> Result<String> {
    let template = json!({
        "title": "Name of the recipe (REQUIRED)",
        "servings": "Number of servings, e.g. '4 servings' or '12 pieces' (REQUIRED)",
        "provider": "Who the recipe comes from (OPTIONAL, e.g. 'Grandma')",
        "reference": "Source or cookbook (OPTIONAL, e.g. 'Grandma's book')",
        "pageNumber": "Page number in the source (OPTIONAL, number)",
        "category": format!("Category (OPTIONAL, e.g. {})", examples(&config.categories())),
        "meal": format!("Meal type (OPTIONAL, e.g. {})", examples(&config.meals())),
        "cuisine": format!("Cuisine (OPTIONAL, e.g. {})", examples(&config.cuisines())),
        "description": "Description of the dish: taste, texture, when it fits, tips (OPTIONAL but recommended)",
        "ingredients": [
            "// For simple recipes, use a list of strings:",
            "500 g wheat flour",
            "2 dl milk",
            "// OR for grouped ingredients, use objects:",
            {"group": "Dough", "items": ["500 g flour", "2 dl milk"]},
            {"group": "Filling", "items": ["100 g sugar", "2 tbsp cinnamon"]}
        ],
        "instructions": [
            "First step of the recipe",
            "Second step with clear instructions",
            "Third step",
            "Continue with every necessary step",
            "Last step and serving suggestions"
        ],
        "image": "Image URL (OPTIONAL, absolute URL or relative path such as ./images/dish.jpg)"
    });
    Ok(serde_json::to_string_pretty(&template)?)
}

pub fn template(config: &CardboxConfig) -> Result<CmdResult> {
    let text = format!(
        "{}\n\n{}\n\n{}",
        TEMPLATE_INTRO,
        template_json(config)?,
        TEMPLATE_NOTES
    );
    Ok(CmdResult::default().with_output(text))
}

/// Ingredients as one sentence: `a, b, Group: c, d.`
fn flatten_ingredients(entries: &[IngredientEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        match entry {
            IngredientEntry::Item(item) => {
                out.push_str(item);
                out.push_str(", ");
            }
            IngredientEntry::Group(group) => {
                out.push_str(&group.name);
                out.push_str(": ");
                out.push_str(&group.items.join(", "));
                out.push_str(". ");
            }
        }
    }
    let trimmed = out.trim();
    trimmed.strip_suffix(',').unwrap_or(trimmed).to_string()
}

pub fn image_prompt(session: &EditSession) -> Result<CmdResult> {
    let form = &session.form;
    let title = form.title.trim();
    if title.is_empty() {
        return Err(CardboxError::Validation(
            "Enter a title before creating an image prompt".to_string(),
        ));
    }

    let or_unspecified = |value: &str| {
        let value = value.trim();
        if value.is_empty() {
            NOT_SPECIFIED.to_string()
        } else {
            value.to_string()
        }
    };
    let ingredients = flatten_ingredients(&parse_ingredients(&form.ingredients));
    let instructions = parse_instructions(&form.instructions).join(". ");

    let text = format!(
        "{intro}\n\n\
         Recipe title: {title}\n\
         Description: {description}\n\
         Category: {category} | Meal: {meal} | Cuisine: {cuisine}\n\
         Ingredients: {ingredients}\n\
         Instructions: {instructions}\n\n\
         {outro}",
        intro = IMAGE_INTRO,
        title = title,
        description = or_unspecified(&form.description),
        category = or_unspecified(&form.category),
        meal = or_unspecified(&form.meal),
        cuisine = or_unspecified(&form.cuisine),
        ingredients = or_unspecified(&ingredients),
        instructions = or_unspecified(&instructions),
        outro = IMAGE_OUTRO,
    );
    Ok(CmdResult::default().with_output(text))
}
