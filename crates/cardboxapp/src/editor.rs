//! Editing a single form field in the user's `$EDITOR`.
//!
//! Multi-line fields (ingredients, instructions, description) are awkward to pass
//! on the command line, so the CLI writes the current value to a temporary file,
//! opens it in the editor and reads it back once the editor exits.

use crate::error::{CardboxError, Result};
use crate::form::FormField;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use uuid::Uuid;

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in ["vim", "vi", "nano"] {
        let found = Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if found {
            return Ok(fallback.to_string());
        }
    }

    Err(CardboxError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Runs the editor on `path` and waits for it to close.
///
/// The editor value may carry arguments (`code --wait`).
pub fn open_in_editor(editor: &str, path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| CardboxError::Api("Editor command is empty".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| CardboxError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(CardboxError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }
    Ok(())
}

/// Temporary file name for editing `field`: `cardbox-ingredients-<uuid>.txt`.
pub fn scratch_name(field: FormField) -> String {
    format!(
        "cardbox-{}-{}.txt",
        field.name().to_lowercase(),
        Uuid::new_v4().simple()
    )
}

/// Opens `initial` in the editor and returns the edited text.
///
/// A single trailing newline added by the editor is dropped; single-line fields
/// keep only their first line.
pub fn edit_field(field: FormField, initial: &str) -> Result<String> {
    let editor = get_editor()?;
    let path = env::temp_dir().join(scratch_name(field));
    fs::write(&path, initial)?;

    let edited = open_in_editor(&editor, &path).and_then(|_| Ok(fs::read_to_string(&path)?));
    let _ = fs::remove_file(&path);

    Ok(clean_edited(field, &edited?))
}

pub fn clean_edited(field: FormField, text: &str) -> String {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let text = text.strip_suffix('\r').unwrap_or(text);
    if field.is_multiline() {
        text.to_string()
    } else {
        text.lines().next().unwrap_or_default().to_string()
    }
}
