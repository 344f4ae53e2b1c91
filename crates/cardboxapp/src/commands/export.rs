use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardboxError, Result};
use crate::model::{today, Recipe, SortKey};
use crate::repository::RecipeRepository;
use crate::store::DataStore;
use crate::view::sorted_view;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// One compact recipe per line inside a JSON array.
pub fn render<'a, I>(recipes: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let lines = recipes
        .into_iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(format!("[\n{}\n]", lines.join(",\n")))
}

pub fn file_name(date: NaiveDate) -> String {
    format!("recipes_{}.json", date.format("%Y-%m-%d"))
}

/// The export text, for the clipboard or stdout.
pub fn payload<S: DataStore>(repo: &RecipeRepository<S>, key: SortKey) -> Result<CmdResult> {
    if repo.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::warning("No recipes to export")));
    }
    let text = render(sorted_view(repo.list(), key))?;
    Ok(CmdResult::default().with_output(text))
}

/// Writes `recipes_<date>.json` into `dir`.
pub fn to_dir<S: DataStore>(
    repo: &RecipeRepository<S>,
    key: SortKey,
    dir: &Path,
) -> Result<CmdResult> {
    if repo.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::warning("No recipes to export")));
    }
    if !dir.is_dir() {
        return Err(CardboxError::Api(format!(
            "Export directory does not exist: {}",
            dir.display()
        )));
    }
    let text = render(sorted_view(repo.list(), key))?;
    let path = dir.join(file_name(today()));
    fs::write(&path, text)?;

    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Exported {} {} to {}",
        repo.len(),
        if repo.len() == 1 { "recipe" } else { "recipes" },
        path.display()
    )));
    result.written_paths.push(path);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::import;
    use crate::commands::MessageLevel;
    use crate::test_utils::{workspace, RecipeFixture};

    #[test]
    fn renders_one_record_per_line() {
        let a = RecipeFixture::new("A").id("1").build();
        let b = RecipeFixture::new("B").id("2").build();
        let text = render([&a, &b]).unwrap();
        assert_eq!(
            text,
            "[\n{\"id\":\"1\",\"title\":\"A\",\"servings\":\"4\"},\n{\"id\":\"2\",\"title\":\"B\",\"servings\":\"4\"}\n]"
        );
        let parsed: Vec<Recipe> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec![a, b]);
    }

    #[test]
    fn file_name_carries_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        assert_eq!(file_name(date), "recipes_2024-02-09.json");
    }

    #[test]
    fn payload_follows_sort_order() {
        let (mut repo, _) = workspace();
        import::from_text(
            &mut repo,
            r#"[{"title":"Cake","provider":"Anna"},{"title":"Apple","provider":"Bob"}]"#,
        )
        .unwrap();

        let alpha = payload(&repo, SortKey::Alphabetical).unwrap().output.unwrap();
        assert!(alpha.find("Apple").unwrap() < alpha.find("Cake").unwrap());
        let person = payload(&repo, SortKey::Person).unwrap().output.unwrap();
        assert!(person.find("Cake").unwrap() < person.find("Apple").unwrap());
    }

    #[test]
    fn empty_repository_warns() {
        let (repo, _) = workspace();
        let result = payload(&repo, SortKey::Alphabetical).unwrap();
        assert!(result.output.is_none());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[0].content, "No recipes to export");
    }

    #[test]
    fn writes_dated_file_that_imports_back() {
        let dir = tempfile::tempdir().unwrap();
        let (mut repo, _) = workspace();
        import::from_text(&mut repo, r#"[{"title":"A","servings":"2"},{"title":"B"}]"#).unwrap();

        let result = to_dir(&repo, SortKey::Alphabetical, dir.path()).unwrap();
        let path = &result.written_paths[0];
        assert_eq!(path.file_name().unwrap().to_string_lossy(), file_name(today()));

        let (mut fresh, _) = workspace();
        import::run(&mut fresh, &[path.clone()]).unwrap();
        assert_eq!(fresh.len(), 2);
    }
}
