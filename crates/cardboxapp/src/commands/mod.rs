//! # Command Layer
//!
//! This module contains the **core business logic** of cardbox. Each command lives
//! in its own submodule and implements plain functions over the repository and
//! the edit session.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Implement the actual logic for each operation
//! - Operate on `Recipe`, `FormState` and `EditSession`
//! - Return structured `CmdResult` with affected recipes and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal output**: no stdout, stderr or formatting for a terminal
//! - **Argument parsing**: that's the CLI layer's job
//! - **User interaction**: no prompts or confirmations; the UI asks first
//! - **Session persistence**: the API facade writes the session back afterwards
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_recipes`: recipes created, updated, moved or deleted
//! - `listed_recipes`: recipes to display, already sorted and annotated
//! - `form`: the working form after the command, when it changed or was asked for
//! - `output`: a text payload (export JSON, preview card, prompts)
//! - `written_paths`: files the command wrote
//! - `messages`: structured messages with levels
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and check `CmdResult` contents and the
//! resulting repository/session state.

use crate::form::FormState;
use crate::history::History;
use crate::model::Recipe;
use crate::view::{RecipeView, Suggestions};
use serde::Serialize;
use std::path::PathBuf;

pub mod delete;
pub mod export;
pub mod form;
pub mod history;
pub mod import;
pub mod list;
pub mod open;
pub mod paste;
pub mod preview;
pub mod prompt;
pub mod regenerate;
pub mod save;
pub mod sort;
pub mod suggest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Where the edit session stands in its undo timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryStatus {
    pub position: usize,
    pub len: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl HistoryStatus {
    pub fn of(history: &History) -> Self {
        Self {
            position: history.cursor().map_or(0, |c| c + 1),
            len: history.len(),
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_recipes: Vec<Recipe>,
    pub listed_recipes: Vec<RecipeView>,
    pub form: Option<FormState>,
    pub history: Option<HistoryStatus>,
    pub suggestions: Option<Suggestions>,
    pub output: Option<String>,
    pub written_paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_recipes(mut self, recipes: Vec<Recipe>) -> Self {
        self.affected_recipes = recipes;
        self
    }

    pub fn with_listed_recipes(mut self, recipes: Vec<RecipeView>) -> Self {
        self.listed_recipes = recipes;
        self
    }

    pub fn with_form(mut self, form: FormState) -> Self {
        self.form = Some(form);
        self
    }

    pub fn with_history(mut self, history: &History) -> Self {
        self.history = Some(HistoryStatus::of(history));
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}
