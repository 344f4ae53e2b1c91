//! # Data Directory
//!
//! Cardbox keeps a single collection per user. All files live in one data
//! directory:
//!
//! ```text
//! <data-dir>/
//!   recipes.json    # the collection, keyed by recipe id
//!   sort-order      # the selected sort key
//!   session.json    # the working form and its undo timeline
//!   cardbox.toml    # optional configuration
//! ```
//!
//! ## Resolution
//!
//! [`data_dir`] picks the directory in this order:
//! 1. An explicit override (the CLI's `--data` flag)
//! 2. The `CARDBOX_DATA` environment variable (used by the tests to isolate state)
//! 3. The OS-appropriate data directory via the `directories` crate
//!
//! The directory is created on first use.

use crate::api::CardboxApi;
use crate::config::{CardboxConfig, CONFIG_FILE};
use crate::error::{CardboxError, Result};
use crate::store::fs::FileStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use log::debug;
use std::fs;
use std::path::PathBuf;

pub const DATA_ENV: &str = "CARDBOX_DATA";

pub struct CardboxContext {
    pub api: CardboxApi<FileStore>,
    pub config: CardboxConfig,
    pub data_dir: PathBuf,
}

pub fn data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "cardbox", "cardbox")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CardboxError::Store("Could not determine data directory".to_string()))
}

/// Loads configuration from the data directory, falling back to defaults.
pub fn load_config(dir: &std::path::Path) -> CardboxConfig {
    Clapfig::builder()
        .app_name("cardbox")
        .file_name(CONFIG_FILE)
        .search_paths(vec![SearchPath::Path(dir.to_path_buf())])
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Resolves the data directory, loads configuration and opens the collection.
pub fn initialize(data_override: Option<PathBuf>) -> Result<CardboxContext> {
    let data_dir = data_dir(data_override)?;
    fs::create_dir_all(&data_dir)?;
    debug!("Using data directory {}", data_dir.display());

    let config = load_config(&data_dir);
    let api = CardboxApi::open(FileStore::new(data_dir.clone()), config.clone())?;

    Ok(CardboxContext {
        api,
        config,
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortKey;
    use tempfile::tempdir;

    #[test]
    fn override_wins() {
        let dir = tempdir().unwrap();
        let resolved = data_dir(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(resolved, dir.path());
    }

    #[test]
    fn initialize_creates_directory_and_reads_config() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("nested").join("cards");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join(CONFIG_FILE), "default_sort = \"source\"\n").unwrap();

        let ctx = initialize(Some(data.clone())).unwrap();
        assert_eq!(ctx.data_dir, data);
        assert_eq!(ctx.api.sort_key(), SortKey::Source);
        assert!(ctx.api.repository().is_empty());
    }

    #[test]
    fn initialize_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("fresh");
        let ctx = initialize(Some(data.clone())).unwrap();
        assert!(data.is_dir());
        assert_eq!(ctx.config, CardboxConfig::default());
    }
}
