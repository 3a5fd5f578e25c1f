//! Password prompt in front of the message view.
//!
//! The password travels as a plain query parameter and is checked by the
//! endpoint. This hides the view; it does not protect the data.

use super::listing::{FAILED_TEXT, FetchVerdict};

pub const WRONG_PASSWORD_ALERT: &str = "Incorrect password";
pub const EMPTY_PASSWORD_ALERT: &str = "Please enter a password";

pub struct PasswordGate {
    required: bool,
    unlocked: bool,
    pub input: String,
    password: Option<String>,
    alert: Option<&'static str>,
}

impl PasswordGate {
    pub fn new(required: bool) -> Self {
        Self {
            required,
            unlocked: false,
            input: String::new(),
            password: None,
            alert: None,
        }
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the message view may be shown.
    pub fn is_open(&self) -> bool {
        !self.required || self.unlocked
    }

    /// Take the typed password for a fetch. `None` (with an alert) if blank.
    pub fn attempt(&mut self) -> Option<String> {
        let candidate = self.input.trim();
        if candidate.is_empty() {
            self.alert = Some(EMPTY_PASSWORD_ALERT);
            return None;
        }
        self.alert = None;
        self.password = Some(candidate.to_string());
        self.password.clone()
    }

    /// Password to attach to fetches, if the view is gated.
    pub fn password(&self) -> Option<&str> {
        if self.required {
            self.password.as_deref()
        } else {
            None
        }
    }

    pub fn record(&mut self, verdict: &FetchVerdict) {
        if !self.required {
            return;
        }
        match verdict {
            FetchVerdict::Rendered | FetchVerdict::Empty => {
                self.unlocked = true;
                self.input.clear();
            }
            FetchVerdict::Rejected(_) => {
                self.unlocked = false;
                self.password = None;
                self.alert = Some(WRONG_PASSWORD_ALERT);
            }
            FetchVerdict::Failed if !self.unlocked => {
                self.alert = Some(FAILED_TEXT);
            }
            FetchVerdict::Stale | FetchVerdict::Failed => {}
        }
    }

    pub fn alert(&self) -> Option<&'static str> {
        self.alert
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
