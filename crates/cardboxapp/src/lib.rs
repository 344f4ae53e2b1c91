//! # Cardbox Architecture
//!
//! Cardbox is a recipe card editor: author, store, browse, sort, preview, export and
//! import structured recipe records kept in a per-user data directory.
//!
//! ## Layers
//!
//! 1. **CLI layer** (`cardbox` binary): argument parsing, confirmation prompts,
//!    terminal rendering. The only place that touches stdout/stderr.
//! 2. **API facade** ([`api::CardboxApi`]): the single entry point. Owns the
//!    repository, the edit session and the selected sort order, and dispatches to
//!    the command layer.
//! 3. **Command layer** ([`commands`]): one module per user operation, returning
//!    structured [`commands::CmdResult`] values.
//! 4. **Domain** ([`repository`], [`history`], [`text`], [`ingest`], [`view`]):
//!    the record store, the undo timeline, the ingredient/instruction parser, the
//!    tolerant ingestion pipeline and sorting.
//! 5. **Storage** ([`store`]): the [`store::DataStore`] trait with a file-backed
//!    implementation and an in-memory one for tests.
//!
//! ## Editing Model
//!
//! Editing happens on a flat [`form::FormState`] of raw strings. Saving parses the
//! form into a [`model::Recipe`]; opening a recipe formats it back. Every commit
//! (save, paste, id regeneration) pushes a snapshot of the form onto the
//! [`history::History`] timeline, which is persisted with the form so undo/redo
//! work across invocations.

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod history;
pub mod ingest;
pub mod init;
pub mod model;
pub mod repository;
pub mod session;
pub mod store;
pub mod text;
pub mod view;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
