use crate::commands::CmdResult;
use crate::model::SortKey;
use crate::repository::RecipeRepository;
use crate::store::DataStore;
use crate::view::project;

pub fn run<S: DataStore>(
    repo: &RecipeRepository<S>,
    key: SortKey,
    active_id: Option<&str>,
) -> CmdResult {
    CmdResult::default().with_listed_recipes(project(repo.list(), key, active_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::import;
    use crate::test_utils::workspace;

    #[test]
    fn lists_sorted_with_annotations() {
        let (mut repo, _) = workspace();
        import::from_text(
            &mut repo,
            r#"[{"title":"Scones","reference":"Tea book","pageNumber":4},
                {"title":"Muffins","reference":"Tea book","pageNumber":2},
                {"title":"Bread"}]"#,
        )
        .unwrap();

        let result = run(&repo, SortKey::Source, None);
        let titles: Vec<&str> = result
            .listed_recipes
            .iter()
            .map(|v| v.recipe.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Muffins", "Scones", "Bread"]);
        assert_eq!(result.listed_recipes[0].meta, vec!["Tea book p.2"]);
        assert!(result.listed_recipes[2].meta.is_empty());
    }

    #[test]
    fn empty_repository_lists_nothing() {
        let (repo, _) = workspace();
        assert!(run(&repo, SortKey::Date, None).listed_recipes.is_empty());
    }
}
