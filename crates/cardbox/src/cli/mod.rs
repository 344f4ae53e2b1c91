//! # CLI Behavior
//!
//! This is **one possible UI client** for cardbox, not the application itself.
//! It plays the part of the recipe form: each invocation loads the collection
//! and the edit session, applies one action and writes both back.
//!
//! ## Naked Execution (`cardbox`)
//!
//! Running `cardbox` with no arguments defaults to `cardbox list`.
//!
//! ## Editing Flow
//!
//! ```text
//! cardbox new                                  # blank form
//! cardbox set title Cinnamon buns              # fill fields
//! cardbox set servings 12
//! cardbox edit ingredients                     # multi-line fields in $EDITOR
//! cardbox save                                 # create or update
//! cardbox undo                                 # back to the previous save
//! ```
//!
//! `cardbox paste` reads recipe text from a file, stdin or the clipboard
//! (`--clipboard`) and replaces the form with it, keeping the id of the recipe
//! being edited.
//!
//! ## Recipe Selectors
//!
//! `open`, `show` and `delete` take the list position (`3`), the id, or the
//! exact title.
//!
//! ## Confirmations
//!
//! Deleting a recipe and moving a saved recipe to a new id ask for
//! confirmation on stdin. `--yes` skips the question.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch, prompts and I/O hand-off
//! - `render`: output formatting (lists, form, messages)
//! - `setup`: argument parsing via clap, grouped help text

mod commands;
mod render;
pub mod setup;

pub use commands::run;
