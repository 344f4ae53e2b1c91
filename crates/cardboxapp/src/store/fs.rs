use super::{DataStore, RecipeMap};
use crate::error::{CardboxError, Result};
use crate::model::SortKey;
use crate::session::EditSession;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const RECIPES_FILE: &str = "recipes.json";
pub const SORT_FILE: &str = "sort-order";
pub const SESSION_FILE: &str = "session.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CardboxError::Io)?;
        }
        Ok(())
    }

    /// Writes through a temp file and a rename so readers never see a partial file.
    fn write_atomic(&self, name: &str, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.root.join(name);
        let tmp = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        let written = fs::write(&tmp, content).and_then(|_| fs::rename(&tmp, &target));
        if let Err(e) = written {
            if tmp.exists() {
                if let Err(cleanup) = fs::remove_file(&tmp) {
                    warn!("could not remove {}: {}", tmp.display(), cleanup);
                }
            }
            return Err(CardboxError::Io(e));
        }
        debug!("wrote {}", target.display());
        Ok(())
    }

    fn read_optional(&self, name: &str) -> Result<Option<String>> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(CardboxError::Io)
    }
}

impl DataStore for FileStore {
    fn load_recipes(&self) -> Result<RecipeMap> {
        match self.read_optional(RECIPES_FILE)? {
            Some(content) if !content.trim().is_empty() => {
                let mut recipes: RecipeMap = serde_json::from_str(&content).map_err(|e| {
                    CardboxError::Store(format!("{} is corrupt: {}", RECIPES_FILE, e))
                })?;
                // Keys are authoritative.
                for (id, recipe) in recipes.iter_mut() {
                    if recipe.id != *id {
                        recipe.id = id.clone();
                    }
                }
                Ok(recipes)
            }
            _ => Ok(RecipeMap::new()),
        }
    }

    fn save_recipes(&self, recipes: &RecipeMap) -> Result<()> {
        let content = serde_json::to_string_pretty(recipes)?;
        self.write_atomic(RECIPES_FILE, &content)
    }

    fn load_sort_key(&self) -> Result<Option<SortKey>> {
        let Some(content) = self.read_optional(SORT_FILE)? else {
            return Ok(None);
        };
        match content.trim().parse::<SortKey>() {
            Ok(key) => Ok(Some(key)),
            Err(e) => {
                warn!("ignoring stored sort order: {}", e);
                Ok(None)
            }
        }
    }

    fn save_sort_key(&self, key: SortKey) -> Result<()> {
        self.write_atomic(SORT_FILE, key.as_str())
    }

    fn load_session(&self) -> Result<Option<EditSession>> {
        let Some(content) = self.read_optional(SESSION_FILE)? else {
            return Ok(None);
        };
        match serde_json::from_str::<EditSession>(&content) {
            Ok(session) => Ok(Some(session.normalized())),
            Err(e) => {
                // A lost session only costs the working form, not saved recipes.
                warn!("discarding unreadable {}: {}", SESSION_FILE, e);
                Ok(None)
            }
        }
    }

    fn save_session(&self, session: &EditSession) -> Result<()> {
        let content = serde_json::to_string_pretty(session)?;
        self.write_atomic(SESSION_FILE, &content)
    }
}
