use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardboxError, Result};
use crate::repository::RecipeRepository;
use crate::session::EditSession;
use crate::store::DataStore;

/// Gives the form a new id. A saved recipe is moved to the new id right away;
/// an unsaved form just carries the id into its first save.
pub fn run<S: DataStore>(
    repo: &mut RecipeRepository<S>,
    session: &mut EditSession,
) -> Result<CmdResult> {
    if session.form.title.trim().is_empty() {
        return Err(CardboxError::Validation(
            "Enter a title before generating a new id".to_string(),
        ));
    }

    let saved_id = session
        .form
        .active_id()
        .filter(|id| repo.contains(id))
        .map(str::to_string);

    let mut result = CmdResult::default();
    match saved_id {
        Some(old_id) => {
            let moved = repo.regenerate_id(&old_id)?;
            session.form.recipe_id = moved.id.clone();
            result.add_message(CmdMessage::success(format!(
                "Recipe moved to {} (was {})",
                moved.id, old_id
            )));
            result.affected_recipes.push(moved);
        }
        None => {
            session.form.recipe_id = repo.fresh_id();
            result.add_message(CmdMessage::info(format!(
                "New id {}; save to store the recipe",
                session.form.recipe_id
            )));
        }
    }
    session.commit();

    Ok(result
        .with_form(session.form.clone())
        .with_history(&session.history))
}
