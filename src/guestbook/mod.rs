pub mod format;
pub mod gate;
pub mod listing;
pub mod submit;

pub use format::{RenderedMessage, render_messages};
pub use gate::PasswordGate;
pub use listing::{Board, FetchVerdict, Lister, refresh_via};
pub use submit::{Status, StatusKind, SubmitForm, submit_via};
