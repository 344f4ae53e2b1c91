//! Imports recipes from JSON files: one recipe object or an array of them.
//!
//! Every accepted recipe gets a new id. Entries without a title are skipped, as
//! are entries that do not have the shape of a recipe (with a warning). All
//! files are parsed before anything is stored, so one malformed file imports
//! nothing at all.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardboxError, Result};
use crate::model::Recipe;
use crate::repository::RecipeRepository;
use crate::store::DataStore;
use log::warn;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Recipes found in one document plus what was left out.
#[derive(Debug, Default)]
pub struct ParsedImport {
    pub recipes: Vec<Recipe>,
    pub untitled: usize,
    pub warnings: Vec<String>,
}

pub fn parse_document(text: &str) -> Result<ParsedImport> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CardboxError::Parse(e.to_string()))?;
    let entries = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => {
            return Err(CardboxError::Parse(
                "Expected a recipe or a list of recipes".to_string(),
            ))
        }
    };

    let mut parsed = ParsedImport::default();
    for (index, entry) in entries.into_iter().enumerate() {
        let has_title = entry
            .get("title")
            .and_then(Value::as_str)
            .is_some_and(|t| !t.trim().is_empty());
        if !has_title {
            parsed.untitled += 1;
            continue;
        }
        match serde_json::from_value::<Recipe>(entry) {
            Ok(recipe) => parsed.recipes.push(recipe),
            Err(e) => {
                warn!("import entry {} rejected: {}", index + 1, e);
                parsed
                    .warnings
                    .push(format!("Entry {} skipped: {}", index + 1, e));
            }
        }
    }
    Ok(parsed)
}

pub fn from_text<S: DataStore>(repo: &mut RecipeRepository<S>, text: &str) -> Result<CmdResult> {
    let parsed = parse_document(text)?;
    store_parsed(repo, vec![parsed])
}

pub fn run<S: DataStore>(repo: &mut RecipeRepository<S>, paths: &[PathBuf]) -> Result<CmdResult> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        documents.push(read_file(path)?);
    }
    store_parsed(repo, documents)
}

fn read_file(path: &Path) -> Result<ParsedImport> {
    let text = fs::read_to_string(path).map_err(|e| {
        CardboxError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    parse_document(&text).map_err(|e| match e {
        CardboxError::Parse(msg) => CardboxError::Parse(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

fn store_parsed<S: DataStore>(
    repo: &mut RecipeRepository<S>,
    documents: Vec<ParsedImport>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut recipes = Vec::new();
    let mut untitled = 0;
    for document in documents {
        recipes.extend(document.recipes);
        untitled += document.untitled;
        for warning in document.warnings {
            result.add_message(CmdMessage::warning(warning));
        }
    }

    let added = repo.import(recipes)?;
    if untitled > 0 {
        result.add_message(CmdMessage::info(format!(
            "Skipped {} {} without a title",
            untitled,
            if untitled == 1 { "entry" } else { "entries" }
        )));
    }
    result.add_message(if added.is_empty() {
        CmdMessage::warning("No recipes imported")
    } else {
        CmdMessage::success(format!(
            "Imported {} {}",
            added.len(),
            if added.len() == 1 { "recipe" } else { "recipes" }
        ))
    });
    Ok(result.with_affected_recipes(added))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::workspace;

    #[test]
    fn skips_untitled_entries_and_assigns_fresh_ids() {
        let (mut repo, _) = workspace();
        let result = from_text(&mut repo, r#"[{"title":"A"},{"servings":"2"}]"#).unwrap();

        assert_eq!(repo.len(), 1);
        let added = &result.affected_recipes[0];
        assert_eq!(added.title, "A");
        assert!(added.id.starts_with("recipe_"));
        assert!(result
            .messages
            .iter()
            .any(|m| m.content == "Skipped 1 entry without a title"));
        assert!(result.messages.iter().any(|m| m.content == "Imported 1 recipe"));
    }

    #[test]
    fn accepts_single_object_and_keeps_content() {
        let (mut repo, _) = workspace();
        let text = r#"{"id":"recipe_1_old","title":"Buns","servings":"12","createdAt":"2019-04-01",
            "ingredients":["flour",{"group":"Filling","items":["butter"]}]}"#;
        let result = from_text(&mut repo, text).unwrap();

        let added = &result.affected_recipes[0];
        assert_ne!(added.id, "recipe_1_old");
        assert_eq!(added.created_at.unwrap().to_string(), "2019-04-01");
        assert_eq!(added.ingredients.len(), 2);
    }

    #[test]
    fn malformed_json_imports_nothing() {
        let (mut repo, _) = workspace();
        let err = from_text(&mut repo, "[{\"title\": \"A\"").unwrap_err();
        assert!(matches!(err, CardboxError::Parse(_)));
        assert!(repo.is_empty());
    }

    #[test]
    fn shape_mismatch_is_skipped_with_warning() {
        let (mut repo, _) = workspace();
        let result = from_text(
            &mut repo,
            r#"[{"title":"Ok"},{"title":"Bad","instructions":"not a list"}]"#,
        )
        .unwrap();
        assert_eq!(repo.len(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.starts_with("Entry 2 skipped")));
    }

    #[test]
    fn scalar_document_is_rejected() {
        let (mut repo, _) = workspace();
        assert!(matches!(
            from_text(&mut repo, "42"),
            Err(CardboxError::Parse(_))
        ));
    }

    #[test]
    fn reads_files_and_names_bad_ones() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(&good, r#"[{"title":"A"},{"title":"B"}]"#).unwrap();
        fs::write(&bad, "nope").unwrap();

        let (mut repo, _) = workspace();
        let err = run(&mut repo, &[good.clone(), bad]).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
        assert!(repo.is_empty());

        run(&mut repo, &[good]).unwrap();
        assert_eq!(repo.len(), 2);
    }
}
