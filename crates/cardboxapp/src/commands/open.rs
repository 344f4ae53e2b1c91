use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardboxError, Result};
use crate::form::FormState;
use crate::repository::RecipeRepository;
use crate::session::EditSession;
use crate::store::DataStore;

/// Loads a saved recipe into the form. The undo timeline restarts there.
pub fn run<S: DataStore>(
    repo: &RecipeRepository<S>,
    session: &mut EditSession,
    id: &str,
) -> Result<CmdResult> {
    let recipe = repo
        .get(id)
        .ok_or_else(|| CardboxError::NotFound(id.to_string()))?;
    session.switch_to(FormState::from_recipe(recipe));

    Ok(CmdResult::default()
        .with_message(CmdMessage::info(format!("Editing \"{}\"", recipe.title)))
        .with_form(session.form.clone())
        .with_history(&session.history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::save;
    use crate::test_utils::{filled_form, workspace};

    #[test]
    fn opening_populates_form_and_resets_history() {
        let (mut repo, mut session) = workspace();
        session.form = filled_form("Soup", "2");
        session.form.ingredients = "water\n---Spices---\nsalt".into();
        let id = save::run(&mut repo, &mut session).unwrap().affected_recipes[0]
            .id
            .clone();

        let mut other = crate::session::EditSession::new();
        other.form.title = "scratch".into();
        other.commit();

        run(&repo, &mut other, &id).unwrap();
        assert_eq!(other.form.recipe_id, id);
        assert_eq!(other.form.title, "Soup");
        assert_eq!(other.form.ingredients, "water\n---Spices---\nsalt");
        assert_eq!(other.history.len(), 1);
        assert!(!other.history.can_undo());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (repo, mut session) = workspace();
        assert!(matches!(
            run(&repo, &mut session, "nope"),
            Err(CardboxError::NotFound(_))
        ));
    }
}
