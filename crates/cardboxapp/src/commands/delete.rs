use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::FormState;
use crate::repository::RecipeRepository;
use crate::session::EditSession;
use crate::store::DataStore;

/// Deletes `id`, or the recipe the form is bound to when no id is given.
///
/// Deleting the recipe being edited also clears the form. Unknown ids are
/// reported and otherwise ignored.
pub fn run<S: DataStore>(
    repo: &mut RecipeRepository<S>,
    session: &mut EditSession,
    id: Option<&str>,
) -> Result<CmdResult> {
    let target = match id.or_else(|| session.form.active_id()) {
        Some(target) => target.to_string(),
        None => {
            return Ok(CmdResult::default()
                .with_message(CmdMessage::warning("No saved recipe is open")))
        }
    };

    let Some(removed) = repo.delete(&target)? else {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
            "No recipe with id {}",
            target
        ))));
    };

    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Recipe \"{}\" deleted",
        removed.title
    )));
    if session.form.active_id() == Some(target.as_str()) {
        session.switch_to(FormState::default());
        result = result
            .with_form(session.form.clone())
            .with_history(&session.history);
    }
    Ok(result.with_affected_recipes(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{save, MessageLevel};
    use crate::test_utils::{filled_form, workspace};

    #[test]
    fn deletes_open_recipe_and_clears_form() {
        let (mut repo, mut session) = workspace();
        session.form = filled_form("Soup", "2");
        save::run(&mut repo, &mut session).unwrap();

        let result = run(&mut repo, &mut session, None).unwrap();
        assert_eq!(result.affected_recipes[0].title, "Soup");
        assert!(repo.is_empty());
        assert_eq!(session.form, FormState::default());
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn deleting_another_recipe_keeps_form() {
        let (mut repo, mut session) = workspace();
        session.form = filled_form("Soup", "2");
        let soup = save::run(&mut repo, &mut session).unwrap().affected_recipes[0].clone();
        session.form = filled_form("Bread", "1");
        session.form.recipe_id.clear();
        save::run(&mut repo, &mut session).unwrap();

        run(&mut repo, &mut session, Some(&soup.id)).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(session.form.title, "Bread");
    }

    #[test]
    fn nothing_open_is_a_warning() {
        let (mut repo, mut session) = workspace();
        let result = run(&mut repo, &mut session, None).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn unknown_id_is_a_warning_and_no_write() {
        let (mut repo, mut session) = workspace();
        let result = run(&mut repo, &mut session, Some("ghost")).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(repo.store().recipe_writes(), 0);
    }
}
