use crate::commands::{CmdMessage, CmdResult};
use crate::session::EditSession;

pub fn undo(session: &mut EditSession) -> CmdResult {
    let message = if session.undo() {
        CmdMessage::success("Undone")
    } else {
        CmdMessage::info("Nothing to undo")
    };
    CmdResult::default()
        .with_message(message)
        .with_form(session.form.clone())
        .with_history(&session.history)
}

pub fn redo(session: &mut EditSession) -> CmdResult {
    let message = if session.redo() {
        CmdMessage::success("Redone")
    } else {
        CmdMessage::info("Nothing to redo")
    };
    CmdResult::default()
        .with_message(message)
        .with_form(session.form.clone())
        .with_history(&session.history)
}
