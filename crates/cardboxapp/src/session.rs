use crate::form::FormState;
use crate::history::History;
use serde::{Deserialize, Serialize};

/// The working form and its undo timeline, persisted between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSession {
    pub form: FormState,
    pub history: History,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// A blank form whose timeline starts with that blank state.
    pub fn new() -> Self {
        Self::open(FormState::default())
    }

    pub fn open(form: FormState) -> Self {
        let history = History::starting_with(form.clone());
        Self { form, history }
    }

    /// Switches the editing target; the timeline restarts from `form`.
    pub fn switch_to(&mut self, form: FormState) {
        self.history.reset(form.clone());
        self.form = form;
    }

    /// Records the current form on the timeline.
    pub fn commit(&mut self) -> bool {
        self.history.snapshot(self.form.clone())
    }

    /// Replaces the form with a snapshot taken from the timeline.
    pub fn restore(&mut self, state: FormState) {
        let form = &mut self.form;
        self.history.replay(|_| *form = state);
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(state) => {
                self.restore(state);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(state) => {
                self.restore(state);
                true
            }
            None => false,
        }
    }

    pub fn normalized(self) -> Self {
        Self {
            form: self.form,
            history: self.history.normalized(),
        }
    }
}
