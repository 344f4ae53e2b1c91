use crate::commands::{CmdMessage, CmdResult};
use crate::form::{FormField, FormState};
use crate::session::EditSession;

pub fn show(session: &EditSession) -> CmdResult {
    CmdResult::default()
        .with_form(session.form.clone())
        .with_history(&session.history)
}

/// Edits one field. Field edits are not snapshots; the next commit records them.
pub fn set_field(session: &mut EditSession, field: FormField, value: String) -> CmdResult {
    session.form.set_field(field, value);
    CmdResult::default()
        .with_message(CmdMessage::info(format!("{} updated", field)))
        .with_form(session.form.clone())
        .with_history(&session.history)
}

/// Empties the form and restarts the undo timeline from the blank state.
pub fn clear(session: &mut EditSession) -> CmdResult {
    session.switch_to(FormState::default());
    CmdResult::default()
        .with_message(CmdMessage::info("Form cleared"))
        .with_form(session.form.clone())
        .with_history(&session.history)
}
