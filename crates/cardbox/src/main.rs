//! # Cardbox CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/cardboxapp/` — UI-agnostic library: recipes, ingestion, editing
//!   session, storage
//! - `crates/cardbox/` — This CLI tool, depends on `cardboxapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/cardbox/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring, prompts, dispatch (commands.rs)          │
//! │  - Terminal rendering with colored (render.rs)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/cardboxapp/src/api.rs)                   │
//! │  - Resolves list positions and titles → recipe ids          │
//! │  - Dispatches to command modules, persists the session      │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/cardboxapp/src/commands/*)           │
//! │  - Business logic + data access                             │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer owns argument
//! parsing, confirmation prompts, clipboard and editor hand-off, rendering and
//! exit codes.
//!
//! ## Testing Approach
//!
//! - **Command layer**: unit tests against the in-memory store.
//! - **API layer**: selector resolution and session persistence.
//! - **CLI layer**: end-to-end tests in `tests/` drive the binary with
//!   `assert_cmd` against a temporary data directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
