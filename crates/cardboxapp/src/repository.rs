//! # Recipe Repository
//!
//! The keyed collection of saved recipes. Loaded once from the [`DataStore`],
//! mutated in memory and written back whole after every mutation.
//!
//! A mutation is staged on a copy of the map and only becomes visible once the
//! store has accepted it, so a failed write leaves memory and disk agreeing.
//!
//! Invariants:
//! - every key maps to a recipe whose `id` equals the key;
//! - `created_at` is set on first save and never changed by later updates.

use crate::error::{CardboxError, Result};
use crate::model::{generate_id, today, Recipe};
use crate::store::{DataStore, RecipeMap};
use log::info;

pub struct RecipeRepository<S: DataStore> {
    store: S,
    records: RecipeMap,
}

impl<S: DataStore> RecipeRepository<S> {
    pub fn load(store: S) -> Result<Self> {
        let records = store.load_recipes()?;
        Ok(Self { store, records })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All recipes, in no particular order.
    pub fn list(&self) -> Vec<&Recipe> {
        self.records.values().collect()
    }

    /// Inserts a new recipe. The recipe keeps its id when it carries an unused
    /// one; otherwise a fresh id is generated.
    pub fn create(&mut self, mut recipe: Recipe) -> Result<Recipe> {
        if recipe.id.trim().is_empty() || self.contains(&recipe.id) {
            recipe.id = self.fresh_id();
        }
        recipe.created_at = Some(today());

        let mut next = self.records.clone();
        next.insert(recipe.id.clone(), recipe.clone());
        self.commit(next)?;
        info!("created recipe {} ({})", recipe.id, recipe.title);
        Ok(recipe)
    }

    /// Replaces the stored recipe wholesale, keeping its creation date.
    pub fn update(&mut self, id: &str, mut recipe: Recipe) -> Result<Recipe> {
        let existing = self
            .records
            .get(id)
            .ok_or_else(|| CardboxError::NotFound(id.to_string()))?;
        recipe.id = id.to_string();
        recipe.created_at = existing.created_at.or_else(|| Some(today()));

        let mut next = self.records.clone();
        next.insert(recipe.id.clone(), recipe.clone());
        self.commit(next)?;
        info!("updated recipe {} ({})", recipe.id, recipe.title);
        Ok(recipe)
    }

    /// Removes a recipe. Deleting an unknown id is a no-op returning `None`.
    pub fn delete(&mut self, id: &str) -> Result<Option<Recipe>> {
        if !self.contains(id) {
            return Ok(None);
        }
        let mut next = self.records.clone();
        let removed = next.remove(id);
        self.commit(next)?;
        info!("deleted recipe {}", id);
        Ok(removed)
    }

    /// Moves a recipe to a freshly generated id in a single write.
    pub fn regenerate_id(&mut self, old_id: &str) -> Result<Recipe> {
        let mut recipe = self
            .records
            .get(old_id)
            .cloned()
            .ok_or_else(|| CardboxError::NotFound(old_id.to_string()))?;
        recipe.id = self.fresh_id();

        let mut next = self.records.clone();
        next.remove(old_id);
        next.insert(recipe.id.clone(), recipe.clone());
        self.commit(next)?;
        info!("moved recipe {} to {}", old_id, recipe.id);
        Ok(recipe)
    }

    /// Adds each recipe under a new id, keeping the rest of its content.
    pub fn import(&mut self, recipes: Vec<Recipe>) -> Result<Vec<Recipe>> {
        let mut next = self.records.clone();
        let mut added = Vec::with_capacity(recipes.len());
        for mut recipe in recipes {
            recipe.id = loop {
                let candidate = generate_id();
                if !next.contains_key(&candidate) {
                    break candidate;
                }
            };
            next.insert(recipe.id.clone(), recipe.clone());
            added.push(recipe);
        }
        if added.is_empty() {
            return Ok(added);
        }
        self.commit(next)?;
        info!("imported {} recipes", added.len());
        Ok(added)
    }

    /// An id not used by any stored recipe.
    pub fn fresh_id(&self) -> String {
        loop {
            let id = generate_id();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn commit(&mut self, next: RecipeMap) -> Result<()> {
        self.store.save_recipes(&next)?;
        self.records = next;
        Ok(())
    }
}
