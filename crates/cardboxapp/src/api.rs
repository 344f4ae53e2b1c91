//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for all cardbox operations, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the state**: the recipe repository, the edit session (form + undo
//!   timeline) and the selected sort order
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (resolving list positions and titles to ids)
//! - **Persists the session** after every command that changed it
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## Selectors
//!
//! Commands that name a recipe accept, in order of precedence:
//! - the exact id (`recipe_1712345678901_k3j9x2m1q`)
//! - a 1-based position in the list under the current sort order (`3`)
//! - a title, compared case-insensitively, when exactly one recipe has it
//!
//! ## Generic Over DataStore
//!
//! `CardboxApi<S: DataStore>` is generic over the storage backend:
//! - Production: `CardboxApi<FileStore>`
//! - Testing: `CardboxApi<InMemoryStore>`

use crate::commands::{self, CmdResult};
use crate::config::CardboxConfig;
use crate::error::{CardboxError, Result};
use crate::form::{FormField, FormState};
use crate::model::SortKey;
use crate::repository::RecipeRepository;
use crate::session::EditSession;
use crate::store::DataStore;
use crate::view::sorted_view;
use std::path::{Path, PathBuf};

pub struct CardboxApi<S: DataStore> {
    repo: RecipeRepository<S>,
    session: EditSession,
    sort_key: SortKey,
    config: CardboxConfig,
}

impl<S: DataStore> CardboxApi<S> {
    /// Loads recipes, the sort order and the last edit session from `store`.
    pub fn open(store: S, config: CardboxConfig) -> Result<Self> {
        let repo = RecipeRepository::load(store)?;
        let sort_key = match repo.store().load_sort_key()? {
            Some(key) => key,
            None => config.default_sort(),
        };
        let session = repo.store().load_session()?.unwrap_or_default();
        Ok(Self {
            repo,
            session,
            sort_key,
            config,
        })
    }

    pub fn config(&self) -> &CardboxConfig {
        &self.config
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn form(&self) -> &FormState {
        &self.session.form
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn repository(&self) -> &RecipeRepository<S> {
        &self.repo
    }

    /// The id of the open recipe if it is saved.
    pub fn open_saved_id(&self) -> Option<&str> {
        self.session
            .form
            .active_id()
            .filter(|id| self.repo.contains(id))
    }

    /// Resolves an id, list position or title to a recipe id.
    pub fn resolve(&self, selector: &str) -> Result<String> {
        let selector = selector.trim();
        if self.repo.contains(selector) {
            return Ok(selector.to_string());
        }

        if let Ok(position) = selector.parse::<usize>() {
            return sorted_view(self.repo.list(), self.sort_key)
                .get(position.wrapping_sub(1))
                .map(|recipe| recipe.id.clone())
                .ok_or_else(|| CardboxError::NotFound(format!("no recipe at position {}", position)));
        }

        let wanted = selector.to_lowercase();
        let matches: Vec<&str> = self
            .repo
            .list()
            .into_iter()
            .filter(|recipe| recipe.title.trim().to_lowercase() == wanted)
            .map(|recipe| recipe.id.as_str())
            .collect();
        match matches.as_slice() {
            [id] => Ok(id.to_string()),
            [] => Err(CardboxError::NotFound(selector.to_string())),
            _ => Err(CardboxError::Api(format!(
                "{} recipes are titled \"{}\"; use the list position or id",
                matches.len(),
                selector
            ))),
        }
    }

    pub fn list(&self, key: Option<SortKey>) -> CmdResult {
        commands::list::run(
            &self.repo,
            key.unwrap_or(self.sort_key),
            self.session.form.active_id(),
        )
    }

    pub fn show_form(&self) -> CmdResult {
        commands::form::show(&self.session)
    }

    pub fn set_field(&mut self, field: FormField, value: String) -> Result<CmdResult> {
        let result = commands::form::set_field(&mut self.session, field, value);
        self.persist_session()?;
        Ok(result)
    }

    pub fn clear_form(&mut self) -> Result<CmdResult> {
        let result = commands::form::clear(&mut self.session);
        self.persist_session()?;
        Ok(result)
    }

    pub fn open_recipe(&mut self, selector: &str) -> Result<CmdResult> {
        let id = self.resolve(selector)?;
        let result = commands::open::run(&self.repo, &mut self.session, &id)?;
        self.persist_session()?;
        Ok(result)
    }

    pub fn save(&mut self) -> Result<CmdResult> {
        let result = commands::save::run(&mut self.repo, &mut self.session)?;
        self.persist_session()?;
        Ok(result)
    }

    /// Deletes the selected recipe, or the open one when no selector is given.
    pub fn delete(&mut self, selector: Option<&str>) -> Result<CmdResult> {
        let id = selector.map(|s| self.resolve(s)).transpose()?;
        let result = commands::delete::run(&mut self.repo, &mut self.session, id.as_deref())?;
        self.persist_session()?;
        Ok(result)
    }

    pub fn regenerate_id(&mut self) -> Result<CmdResult> {
        let result = commands::regenerate::run(&mut self.repo, &mut self.session)?;
        self.persist_session()?;
        Ok(result)
    }

    pub fn paste(&mut self, raw: &str) -> Result<CmdResult> {
        let result = commands::paste::run(&self.repo, &mut self.session, raw)?;
        self.persist_session()?;
        Ok(result)
    }

    pub fn undo(&mut self) -> Result<CmdResult> {
        let result = commands::history::undo(&mut self.session);
        self.persist_session()?;
        Ok(result)
    }

    pub fn redo(&mut self) -> Result<CmdResult> {
        let result = commands::history::redo(&mut self.session);
        self.persist_session()?;
        Ok(result)
    }

    pub fn import(&mut self, paths: &[PathBuf]) -> Result<CmdResult> {
        commands::import::run(&mut self.repo, paths)
    }

    pub fn import_text(&mut self, text: &str) -> Result<CmdResult> {
        commands::import::from_text(&mut self.repo, text)
    }

    pub fn export_payload(&self) -> Result<CmdResult> {
        commands::export::payload(&self.repo, self.sort_key)
    }

    pub fn export_to(&self, dir: &Path) -> Result<CmdResult> {
        commands::export::to_dir(&self.repo, self.sort_key, dir)
    }

    pub fn preview(&self) -> Result<CmdResult> {
        commands::preview::run(&self.session)
    }

    pub fn show(&self, selector: &str) -> Result<CmdResult> {
        let id = self.resolve(selector)?;
        commands::preview::show(&self.repo, &id)
    }

    pub fn template(&self) -> Result<CmdResult> {
        commands::prompt::template(&self.config)
    }

    pub fn image_prompt(&self) -> Result<CmdResult> {
        commands::prompt::image_prompt(&self.session)
    }

    pub fn set_sort(&mut self, key: SortKey) -> Result<CmdResult> {
        let result = commands::sort::set(self.repo.store(), key)?;
        self.sort_key = key;
        Ok(result)
    }

    pub fn show_sort(&self) -> CmdResult {
        commands::sort::show(self.sort_key)
    }

    pub fn suggestions(&self) -> CmdResult {
        commands::suggest::run(&self.repo, &self.config)
    }

    fn persist_session(&self) -> Result<()> {
        self.repo.store().save_session(&self.session)
    }
}
