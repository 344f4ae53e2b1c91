use crate::form::FormState;
use crate::model::Recipe;
use crate::repository::RecipeRepository;
use crate::session::EditSession;
use crate::store::memory::InMemoryStore;
use chrono::NaiveDate;

/// Builder for recipes in tests.
pub struct RecipeFixture {
    recipe: Recipe,
}

impl RecipeFixture {
    pub fn new(title: &str) -> Self {
        Self {
            recipe: Recipe::new(title, "4"),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.recipe.id = id.to_string();
        self
    }

    pub fn provider(mut self, provider: &str) -> Self {
        self.recipe.provider = Some(provider.to_string());
        self
    }

    pub fn reference(mut self, reference: &str, page: Option<i64>) -> Self {
        self.recipe.reference = Some(reference.to_string());
        self.recipe.page_number = page;
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.recipe.category = Some(category.to_string());
        self
    }

    pub fn created(mut self, y: i32, m: u32, d: u32) -> Self {
        self.recipe.created_at = NaiveDate::from_ymd_opt(y, m, d);
        self
    }

    pub fn build(self) -> Recipe {
        self.recipe
    }
}

/// A form with the two required fields filled in.
pub fn filled_form(title: &str, servings: &str) -> FormState {
    FormState {
        title: title.to_string(),
        servings: servings.to_string(),
        ..Default::default()
    }
}

/// An empty in-memory repository and a fresh session.
pub fn workspace() -> (RecipeRepository<InMemoryStore>, EditSession) {
    let repo = RecipeRepository::load(InMemoryStore::new()).expect("in-memory load");
    (repo, EditSession::new())
}
