use super::{DataStore, RecipeMap};
use crate::error::{CardboxError, Result};
use crate::model::SortKey;
use crate::session::EditSession;
use std::cell::{Cell, RefCell};

/// In-memory store for tests.
///
/// Uses `RefCell` for interior mutability since cardbox is single-threaded.
#[derive(Default)]
pub struct InMemoryStore {
    recipes: RefCell<RecipeMap>,
    sort_key: Cell<Option<SortKey>>,
    session: RefCell<Option<EditSession>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful recipe writes so far.
    pub fn recipe_writes(&self) -> usize {
        self.writes.get()
    }

    /// The recipes as last persisted.
    pub fn persisted_recipes(&self) -> RecipeMap {
        self.recipes.borrow().clone()
    }

    fn check_write(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(CardboxError::Io(std::io::Error::other(
                "Simulated write error",
            )));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn load_recipes(&self) -> Result<RecipeMap> {
        Ok(self.recipes.borrow().clone())
    }

    fn save_recipes(&self, recipes: &RecipeMap) -> Result<()> {
        self.check_write()?;
        *self.recipes.borrow_mut() = recipes.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn load_sort_key(&self) -> Result<Option<SortKey>> {
        Ok(self.sort_key.get())
    }

    fn save_sort_key(&self, key: SortKey) -> Result<()> {
        self.check_write()?;
        self.sort_key.set(Some(key));
        Ok(())
    }

    fn load_session(&self) -> Result<Option<EditSession>> {
        Ok(self.session.borrow().clone())
    }

    fn save_session(&self, session: &EditSession) -> Result<()> {
        self.check_write()?;
        *self.session.borrow_mut() = Some(session.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Recipe;

    #[test]
    fn round_trips_recipes_and_counts_writes() {
        let store = InMemoryStore::new();
        let mut map = RecipeMap::new();
        map.insert("r1".into(), Recipe::new("Soup", "2"));
        store.save_recipes(&map).unwrap();

        assert_eq!(store.load_recipes().unwrap(), map);
        assert_eq!(store.recipe_writes(), 1);
    }

    #[test]
    fn simulated_write_error_leaves_data_untouched() {
        let store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        let mut map = RecipeMap::new();
        map.insert("r1".into(), Recipe::new("Soup", "2"));

        assert!(store.save_recipes(&map).is_err());
        assert!(store.save_sort_key(SortKey::Date).is_err());
        assert!(store.load_recipes().unwrap().is_empty());
        assert_eq!(store.load_sort_key().unwrap(), None);
    }
}
