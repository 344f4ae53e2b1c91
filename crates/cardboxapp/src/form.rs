use crate::error::{CardboxError, Result};
use crate::model::{parse_page_number, Recipe};
use crate::text::{format_ingredients, format_instructions, parse_ingredients, parse_instructions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The editing form: every field as the raw text the user typed.
///
/// This is also the unit of the undo history; snapshots are plain clones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub recipe_id: String,
    pub title: String,
    pub provider: String,
    pub reference: String,
    pub page_number: String,
    pub servings: String,
    pub category: String,
    pub meal: String,
    pub cuisine: String,
    pub description: String,
    pub image: String,
    pub ingredients: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Provider,
    Reference,
    PageNumber,
    Servings,
    Category,
    Meal,
    Cuisine,
    Description,
    Image,
    Ingredients,
    Instructions,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::Title,
        FormField::Provider,
        FormField::Reference,
        FormField::PageNumber,
        FormField::Servings,
        FormField::Category,
        FormField::Meal,
        FormField::Cuisine,
        FormField::Description,
        FormField::Image,
        FormField::Ingredients,
        FormField::Instructions,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Provider => "provider",
            FormField::Reference => "reference",
            FormField::PageNumber => "pageNumber",
            FormField::Servings => "servings",
            FormField::Category => "category",
            FormField::Meal => "meal",
            FormField::Cuisine => "cuisine",
            FormField::Description => "description",
            FormField::Image => "image",
            FormField::Ingredients => "ingredients",
            FormField::Instructions => "instructions",
        }
    }

    /// Multi-line fields are the ones worth opening in an editor.
    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            FormField::Description | FormField::Ingredients | FormField::Instructions
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = CardboxError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "title" => Ok(FormField::Title),
            "provider" | "person" => Ok(FormField::Provider),
            "reference" | "source" => Ok(FormField::Reference),
            "pagenumber" | "page" => Ok(FormField::PageNumber),
            "servings" => Ok(FormField::Servings),
            "category" => Ok(FormField::Category),
            "meal" => Ok(FormField::Meal),
            "cuisine" => Ok(FormField::Cuisine),
            "description" => Ok(FormField::Description),
            "image" => Ok(FormField::Image),
            "ingredients" => Ok(FormField::Ingredients),
            "instructions" | "steps" => Ok(FormField::Instructions),
            _ => Err(CardboxError::Validation(format!(
                "Unknown field '{}'. Fields: {}",
                s,
                FormField::ALL
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl FormState {
    /// Populates a form from a stored record.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            recipe_id: recipe.id.clone(),
            title: recipe.title.clone(),
            provider: text(&recipe.provider),
            reference: text(&recipe.reference),
            page_number: recipe
                .page_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
            servings: recipe.servings.clone(),
            category: text(&recipe.category),
            meal: text(&recipe.meal),
            cuisine: text(&recipe.cuisine),
            description: text(&recipe.description),
            image: text(&recipe.image),
            ingredients: format_ingredients(&recipe.ingredients),
            instructions: format_instructions(&recipe.instructions),
        }
    }

    /// The id the form is bound to, if any.
    pub fn active_id(&self) -> Option<&str> {
        let id = self.recipe_id.trim();
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Provider => &self.provider,
            FormField::Reference => &self.reference,
            FormField::PageNumber => &self.page_number,
            FormField::Servings => &self.servings,
            FormField::Category => &self.category,
            FormField::Meal => &self.meal,
            FormField::Cuisine => &self.cuisine,
            FormField::Description => &self.description,
            FormField::Image => &self.image,
            FormField::Ingredients => &self.ingredients,
            FormField::Instructions => &self.instructions,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::Provider => &mut self.provider,
            FormField::Reference => &mut self.reference,
            FormField::PageNumber => &mut self.page_number,
            FormField::Servings => &mut self.servings,
            FormField::Category => &mut self.category,
            FormField::Meal => &mut self.meal,
            FormField::Cuisine => &mut self.cuisine,
            FormField::Description => &mut self.description,
            FormField::Image => &mut self.image,
            FormField::Ingredients => &mut self.ingredients,
            FormField::Instructions => &mut self.instructions,
        };
        *slot = value.into();
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CardboxError::Validation("Title is required".to_string()));
        }
        if self.servings.trim().is_empty() {
            return Err(CardboxError::Validation("Servings is required".to_string()));
        }
        Ok(())
    }

    /// Builds the record a save would store. The id is left as the form holds it
    /// and `created_at` is left for the repository to assign.
    pub fn to_recipe(&self) -> Result<Recipe> {
        self.validate()?;

        let optional = |value: &str| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let mut recipe = Recipe::new(self.title.trim(), self.servings.trim());
        recipe.id = self.recipe_id.trim().to_string();
        recipe.provider = optional(&self.provider);
        recipe.reference = optional(&self.reference);
        recipe.page_number = parse_page_number(&self.page_number);
        recipe.category = optional(&self.category);
        recipe.meal = optional(&self.meal);
        recipe.cuisine = optional(&self.cuisine);
        recipe.description = optional(&self.description);
        recipe.image = optional(&self.image);
        recipe.ingredients = parse_ingredients(&self.ingredients);
        recipe.instructions = parse_instructions(&self.instructions);
        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientEntry;

    fn filled() -> FormState {
        FormState {
            title: "  Waffles ".into(),
            servings: "4".into(),
            provider: "Grandma".into(),
            page_number: "12".into(),
            category: "   ".into(),
            ingredients: "500g flour\n---Topping---\njam".into(),
            instructions: "Mix\n\nBake".into(),
            ..Default::default()
        }
    }

    #[test]
    fn to_recipe_trims_and_omits_empty_fields() {
        let recipe = filled().to_recipe().unwrap();
        assert_eq!(recipe.title, "Waffles");
        assert_eq!(recipe.provider.as_deref(), Some("Grandma"));
        assert_eq!(recipe.category, None);
        assert_eq!(recipe.reference, None);
        assert_eq!(recipe.page_number, Some(12));
        assert_eq!(
            recipe.ingredients,
            vec![
                IngredientEntry::item("500g flour"),
                IngredientEntry::group("Topping", ["jam"]),
            ]
        );
        assert_eq!(recipe.instructions, vec!["Mix", "Bake"]);
        assert_eq!(recipe.created_at, None);
    }

    #[test]
    fn title_and_servings_are_required() {
        let mut form = filled();
        form.title = "   ".into();
        assert!(matches!(
            form.to_recipe(),
            Err(CardboxError::Validation(msg)) if msg.contains("Title")
        ));

        let mut form = filled();
        form.servings.clear();
        assert!(matches!(
            form.to_recipe(),
            Err(CardboxError::Validation(msg)) if msg.contains("Servings")
        ));
    }

    #[test]
    fn from_recipe_formats_lists_back_to_text() {
        let recipe = filled().to_recipe().unwrap();
        let form = FormState::from_recipe(&recipe);
        assert_eq!(form.ingredients, "500g flour\n---Topping---\njam");
        assert_eq!(form.instructions, "Mix\nBake");
        assert_eq!(form.page_number, "12");
        assert_eq!(form.category, "");
        assert_eq!(form.to_recipe().unwrap(), recipe);
    }

    #[test]
    fn field_names_parse_leniently() {
        assert_eq!("pageNumber".parse::<FormField>().unwrap(), FormField::PageNumber);
        assert_eq!("page-number".parse::<FormField>().unwrap(), FormField::PageNumber);
        assert_eq!("Page".parse::<FormField>().unwrap(), FormField::PageNumber);
        assert_eq!("steps".parse::<FormField>().unwrap(), FormField::Instructions);
        assert!("colour".parse::<FormField>().is_err());
        for field in FormField::ALL {
            assert_eq!(field.name().parse::<FormField>().unwrap(), field);
        }
    }

    #[test]
    fn set_and_read_fields() {
        let mut form = FormState::default();
        form.set_field(FormField::Cuisine, "Italian");
        assert_eq!(form.field(FormField::Cuisine), "Italian");
        assert_eq!(form.cuisine, "Italian");
    }

    #[test]
    fn active_id_ignores_blank_ids() {
        let mut form = FormState::default();
        assert_eq!(form.active_id(), None);
        form.recipe_id = "recipe_1_x".into();
        assert_eq!(form.active_id(), Some("recipe_1_x"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(FormState::default()).unwrap();
        assert!(json.get("recipeId").is_some());
        assert!(json.get("pageNumber").is_some());
    }
}
