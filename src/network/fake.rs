//! Scripted in-process [`Remote`] for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::common::{NewEntry, SubmitReceipt};
use crate::error::GuestbookError;

use super::envelope::ListOutcome;
use super::remote::Remote;

#[derive(Default)]
pub struct FakeRemote {
    posts: Mutex<VecDeque<Result<SubmitReceipt, GuestbookError>>>,
    lists: Mutex<VecDeque<Result<ListOutcome, GuestbookError>>>,
    pub post_calls: AtomicUsize,
    pub beacon_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    fail_beacons: bool,
    pub passwords_seen: Mutex<Vec<Option<String>>>,
    pub entries_seen: Mutex<Vec<NewEntry>>,
}

impl FakeRemote {
    pub fn with_post(self, result: Result<SubmitReceipt, GuestbookError>) -> Self {
        self.posts.lock().unwrap().push_back(result);
        self
    }

    pub fn with_list(self, result: Result<ListOutcome, GuestbookError>) -> Self {
        self.lists.lock().unwrap().push_back(result);
        self
    }

    pub fn with_failing_beacons(mut self) -> Self {
        self.fail_beacons = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
            + self.beacon_calls.load(Ordering::SeqCst)
            + self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl Remote for FakeRemote {
    async fn post_message(&self, entry: &NewEntry) -> Result<SubmitReceipt, GuestbookError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        self.entries_seen.lock().unwrap().push(entry.clone());
        let next = self.posts.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(SubmitReceipt::default()))
    }

    async fn send_beacon(&self, entry: &NewEntry) -> Result<(), GuestbookError> {
        self.beacon_calls.fetch_add(1, Ordering::SeqCst);
        self.entries_seen.lock().unwrap().push(entry.clone());
        if self.fail_beacons {
            return Err(GuestbookError::HttpStatus(503));
        }
        Ok(())
    }

    async fn fetch_messages(&self, password: Option<&str>) -> Result<ListOutcome, GuestbookError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.passwords_seen
            .lock()
            .unwrap()
            .push(password.map(str::to_string));
        let next = self.lists.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(ListOutcome::Messages(Vec::new())))
    }
}
