//! The post form: validation, status line and the two send strategies.

use std::time::{Duration, Instant};

use crate::common::{NewEntry, SendMode, SubmitReceipt};
use crate::error::GuestbookError;
use crate::network::Remote;

pub const DEFAULT_STATUS_HIDE: Duration = Duration::from_millis(3000);

const SENDING_TEXT: &str = "Sending...";
const SENT_TEXT: &str = "Message sent!";
const FAILED_TEXT: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Sending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

pub struct SubmitForm {
    pub name: String,
    pub message: String,
    mode: SendMode,
    hide_after: Duration,
    status: Option<Status>,
    hide_at: Option<Instant>,
    sending: bool,
}

impl SubmitForm {
    pub fn new(mode: SendMode, hide_after: Duration) -> Self {
        Self {
            name: String::new(),
            message: String::new(),
            mode,
            hide_after,
            status: None,
            hide_at: None,
            sending: false,
        }
    }

    pub fn mode(&self) -> SendMode {
        self.mode
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Whether the send control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.sending
    }

    /// When the current status is due to disappear.
    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Validate the fields and, if they pass, return the entry to transmit.
    ///
    /// `None` means nothing may be sent: either a field is empty (the status
    /// shows why) or a send is already outstanding.
    pub fn begin_submit(&mut self, now: Instant) -> Option<NewEntry> {
        if self.sending {
            return None;
        }

        let name = self.name.trim();
        let message = self.message.trim();
        if name.is_empty() || message.is_empty() {
            self.show(GuestbookError::Validation.to_string(), StatusKind::Error, None);
            return None;
        }

        let entry = NewEntry {
            name: name.to_string(),
            message: message.to_string(),
        };
        self.sending = true;

        match self.mode {
            SendMode::Confirmed => self.show(SENDING_TEXT.to_string(), StatusKind::Sending, None),
            SendMode::Optimistic => {
                self.clear_fields();
                self.show(
                    SENT_TEXT.to_string(),
                    StatusKind::Success,
                    Some(now + self.hide_after),
                );
            }
        }

        Some(entry)
    }

    /// Apply the endpoint's answer to a confirmed send.
    pub fn finish(&mut self, result: Result<SubmitReceipt, GuestbookError>, now: Instant) {
        self.sending = false;

        match result {
            Ok(receipt) => {
                if let Some(row) = receipt.row {
                    log::info!("Message stored in row {row}");
                }
                self.clear_fields();
                self.show(
                    SENT_TEXT.to_string(),
                    StatusKind::Success,
                    Some(now + self.hide_after),
                );
            }
            Err(GuestbookError::Application(reason)) if !reason.trim().is_empty() => {
                self.show(reason, StatusKind::Error, None);
            }
            Err(_) => self.show(FAILED_TEXT.to_string(), StatusKind::Error, None),
        }
    }

    /// Completion callback of an optimistic send.
    pub fn settle(&mut self) {
        self.sending = false;
    }

    /// Drop the status once its hide deadline has passed. Returns true if it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if deadline <= now => {
                self.status = None;
                self.hide_at = None;
                true
            }
            _ => false,
        }
    }

    fn show(&mut self, text: String, kind: StatusKind, hide_at: Option<Instant>) {
        self.status = Some(Status { text, kind });
        self.hide_at = hide_at;
    }

    fn clear_fields(&mut self) {
        self.name.clear();
        self.message.clear();
    }
}

/// Run one submission to completion against `remote`.
pub async fn submit_via<R: Remote>(form: &mut SubmitForm, remote: &R) {
    let Some(entry) = form.begin_submit(Instant::now()) else {
        return;
    };

    match form.mode() {
        SendMode::Confirmed => {
            let result = remote.post_message(&entry).await;
            if let Err(err) = &result {
                log::error!("Submission failed: {err}");
            }
            form.finish(result, Instant::now());
        }
        SendMode::Optimistic => {
            if let Err(err) = remote.send_beacon(&entry).await {
                log::error!("Optimistic send failed: {err}");
            }
            form.settle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::fake::FakeRemote;

    fn filled(mode: SendMode) -> SubmitForm {
        let mut form = SubmitForm::new(mode, DEFAULT_STATUS_HIDE);
        form.name = "  Ann ".into();
        form.message = "hello there\n".into();
        form
    }

    #[tokio::test]
    async fn empty_field_never_reaches_the_network() {
        let remote = FakeRemote::default();

        for (name, message) in [("", "hi"), ("Ann", "   "), ("", "")] {
            let mut form = SubmitForm::new(SendMode::Confirmed, DEFAULT_STATUS_HIDE);
            form.name = name.into();
            form.message = message.into();

            submit_via(&mut form, &remote).await;

            let status = form.status().unwrap();
            assert_eq!(status.text, "Please fill in all fields");
            assert_eq!(status.kind, StatusKind::Error);
            assert!(form.can_submit());
        }
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn confirmed_success_clears_fields() {
        let remote = FakeRemote::default().with_post(Ok(SubmitReceipt { row: Some(3) }));
        let mut form = filled(SendMode::Confirmed);

        submit_via(&mut form, &remote).await;

        assert_eq!(form.name, "");
        assert_eq!(form.message, "");
        assert_eq!(form.status().unwrap().text, "Message sent!");
        assert!(form.can_submit());
        assert_eq!(
            remote.entries_seen.lock().unwrap()[0],
            NewEntry {
                name: "Ann".into(),
                message: "hello there".into()
            }
        );
    }

    #[test]
    fn status_clears_after_three_seconds() {
        let start = Instant::now();
        let mut form = filled(SendMode::Confirmed);

        let entry = form.begin_submit(start);
        assert!(entry.is_some());
        assert_eq!(form.status().unwrap().kind, StatusKind::Sending);
        assert!(!form.can_submit());

        form.finish(Ok(SubmitReceipt::default()), start);
        assert!(!form.tick(start + Duration::from_millis(2999)));
        assert!(form.status().is_some());
        assert!(form.tick(start + Duration::from_millis(3000)));
        assert!(form.status().is_none());
    }

    #[tokio::test]
    async fn transport_failure_keeps_input_and_reenables() {
        let remote = FakeRemote::default().with_post(Err(GuestbookError::HttpStatus(500)));
        let mut form = filled(SendMode::Confirmed);

        submit_via(&mut form, &remote).await;

        let status = form.status().unwrap();
        assert_eq!(status.text, "Failed to send message. Please try again.");
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(form.name, "  Ann ");
        assert!(form.can_submit());
        assert!(form.hide_deadline().is_none());
    }

    #[test]
    fn application_failure_is_shown_verbatim() {
        let now = Instant::now();
        let mut form = filled(SendMode::Confirmed);
        form.begin_submit(now);
        form.finish(Err(GuestbookError::Application("Sheet locked".into())), now);
        assert_eq!(form.status().unwrap().text, "Sheet locked");

        form.begin_submit(now);
        form.finish(Err(GuestbookError::Application(" ".into())), now);
        assert_eq!(
            form.status().unwrap().text,
            "Failed to send message. Please try again."
        );
    }

    #[test]
    fn optimistic_reports_success_before_the_call() {
        let now = Instant::now();
        let mut form = filled(SendMode::Optimistic);

        let entry = form.begin_submit(now).unwrap();
        assert_eq!(entry.name, "Ann");
        assert_eq!(form.status().unwrap().text, "Message sent!");
        assert_eq!(form.name, "");
        assert!(!form.can_submit());

        form.settle();
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn optimistic_failure_is_not_surfaced() {
        let remote = FakeRemote::default().with_failing_beacons();
        let mut form = filled(SendMode::Optimistic);

        submit_via(&mut form, &remote).await;

        assert_eq!(form.status().unwrap().kind, StatusKind::Success);
        assert!(form.can_submit());
        assert_eq!(remote.post_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn outstanding_send_blocks_a_second_one() {
        let now = Instant::now();
        let mut form = filled(SendMode::Confirmed);
        assert!(form.begin_submit(now).is_some());
        form.name = "Bob".into();
        form.message = "again".into();
        assert!(form.begin_submit(now).is_none());
        assert_eq!(form.status().unwrap().kind, StatusKind::Sending);
    }
}
