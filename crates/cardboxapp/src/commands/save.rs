use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::repository::RecipeRepository;
use crate::session::EditSession;
use crate::store::DataStore;

/// Saves the working form: an update when it is bound to a saved recipe,
/// otherwise a new recipe. Snapshots the form on success.
pub fn run<S: DataStore>(
    repo: &mut RecipeRepository<S>,
    session: &mut EditSession,
) -> Result<CmdResult> {
    let recipe = session.form.to_recipe()?;
    let existing = session
        .form
        .active_id()
        .filter(|id| repo.contains(id))
        .map(str::to_string);

    let (saved, verb) = match existing {
        Some(id) => (repo.update(&id, recipe)?, "updated"),
        None => (repo.create(recipe)?, "saved"),
    };

    session.form.recipe_id = saved.id.clone();
    session.commit();

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Recipe \"{}\" {}",
            saved.title, verb
        )))
        .with_form(session.form.clone())
        .with_history(&session.history)
        .with_affected_recipes(vec![saved]))
}
