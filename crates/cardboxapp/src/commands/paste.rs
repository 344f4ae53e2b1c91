use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::ingest::ingest;
use crate::repository::RecipeRepository;
use crate::session::EditSession;
use crate::store::DataStore;

/// Fills the form from pasted recipe data. Nothing is saved; when a saved
/// recipe is open the form stays bound to it so the next save updates it.
pub fn run<S: DataStore>(
    repo: &RecipeRepository<S>,
    session: &mut EditSession,
    raw: &str,
) -> Result<CmdResult> {
    let active = session.form.active_id().filter(|id| repo.contains(id));
    let form = ingest(raw, active)?;

    let message = if form.recipe_id.is_empty() {
        "Parsed. Review the form and save the recipe".to_string()
    } else {
        format!("Parsed. Saving will update \"{}\"", form.title)
    };
    session.form = form;
    session.commit();

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(message))
        .with_form(session.form.clone())
        .with_history(&session.history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::save;
    use crate::error::CardboxError;
    use crate::test_utils::{filled_form, workspace};

    #[test]
    fn paste_fills_unbound_form() {
        let (repo, mut session) = workspace();
        run(
            &repo,
            &mut session,
            r#"recipe: {"id": "x", "title": "Pancakes", "servings": "4"}"#,
        )
        .unwrap();
        assert_eq!(session.form.title, "Pancakes");
        assert_eq!(session.form.recipe_id, "");
        assert_eq!(session.history.len(), 2);
    }

    #[test]
    fn paste_keeps_binding_to_open_recipe() {
        let (mut repo, mut session) = workspace();
        session.form = filled_form("Pancakes", "4");
        let saved = save::run(&mut repo, &mut session).unwrap().affected_recipes[0].clone();

        run(&repo, &mut session, "{title: 'Better pancakes', servings: '6'}").unwrap();
        assert_eq!(session.form.recipe_id, saved.id);

        save::run(&mut repo, &mut session).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(&saved.id).unwrap().title, "Better pancakes");
    }

    #[test]
    fn paste_while_bound_to_unsaved_id_drops_it() {
        let (repo, mut session) = workspace();
        session.form.recipe_id = "recipe_1_unsaved".into();
        run(&repo, &mut session, r#"{"title": "Toast"}"#).unwrap();
        assert_eq!(session.form.recipe_id, "");
    }

    #[test]
    fn failed_paste_leaves_form_alone() {
        let (repo, mut session) = workspace();
        session.form = filled_form("Keep me", "1");
        let before = session.clone();

        assert!(matches!(
            run(&repo, &mut session, "this is not a recipe"),
            Err(CardboxError::Parse(_))
        ));
        assert_eq!(session, before);
    }
}
