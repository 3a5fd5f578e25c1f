use crate::guestbook::{Lister, PasswordGate, SubmitForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Post,
    View,
}

/// UI-local state.
pub struct AppState {
    pub page: Page,
    pub form: SubmitForm,
    pub lister: Lister,
    pub gate: PasswordGate,
}

impl AppState {
    pub fn new(form: SubmitForm, lister: Lister, gate: PasswordGate) -> Self {
        Self {
            page: Page::Post,
            form,
            lister,
            gate,
        }
    }
}
