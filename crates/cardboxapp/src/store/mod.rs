//! # Storage
//!
//! [`DataStore`] is the persistence seam. The repository, the sort preference and
//! the edit session are each stored as one unit and written back whole.
//!
//! - [`fs::FileStore`]: a data directory on disk, written atomically.
//! - [`memory::InMemoryStore`]: for tests, with write-failure simulation.
//!
//! ```text
//! <data-dir>/
//! ├── recipes.json    # id -> recipe
//! ├── sort-order      # last selected sort order
//! └── session.json    # working form + undo timeline
//! ```
//!
//! All methods take `&self`; the in-memory store uses interior mutability since
//! everything runs on one thread.

use crate::error::Result;
use crate::model::{Recipe, SortKey};
use crate::session::EditSession;
use std::collections::BTreeMap;

pub mod fs;
pub mod memory;

pub type RecipeMap = BTreeMap<String, Recipe>;

pub trait DataStore {
    /// Missing storage loads as an empty map.
    fn load_recipes(&self) -> Result<RecipeMap>;
    fn save_recipes(&self, recipes: &RecipeMap) -> Result<()>;

    fn load_sort_key(&self) -> Result<Option<SortKey>>;
    fn save_sort_key(&self, key: SortKey) -> Result<()>;

    fn load_session(&self) -> Result<Option<EditSession>>;
    fn save_session(&self, session: &EditSession) -> Result<()>;
}
