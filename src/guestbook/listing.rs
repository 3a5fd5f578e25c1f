//! The message view: cache-first rendering and fetch results.
//!
//! Each fetch is numbered. Only the answer to the newest fetch may change
//! the board; anything older that resolves late is dropped.

use crate::common::GuestbookMessage;
use crate::error::GuestbookError;
use crate::network::{ListOutcome, Remote};
use crate::storage::MessageCache;

pub const LOADING_TEXT: &str = "Loading messages...";
pub const EMPTY_TEXT: &str = "No messages yet. Be the first to post!";
pub const FAILED_TEXT: &str = "Failed to load messages. Please try again later.";

/// What the message container currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Board {
    Loading,
    Placeholder(&'static str),
    /// Newest first.
    Messages(Vec<GuestbookMessage>),
}

/// How a fetch result was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchVerdict {
    /// Superseded by a newer fetch and ignored.
    Stale,
    Rendered,
    Empty,
    Rejected(Option<String>),
    Failed,
}

pub struct Lister {
    board: Board,
    cache: Option<MessageCache>,
    /// The board shows the cached collection, not a fetch result.
    from_cache: bool,
    issued: u64,
}

impl Lister {
    pub fn new(cache: Option<MessageCache>) -> Self {
        Self {
            board: Board::Loading,
            cache,
            from_cache: false,
            issued: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn has_content(&self) -> bool {
        matches!(self.board, Board::Messages(_))
    }

    /// Render the cached collection, if any. A corrupt cache is logged and skipped.
    pub fn restore_from_cache(&mut self) -> bool {
        let Some(cache) = &self.cache else {
            return false;
        };

        match cache.load_messages() {
            Ok(Some(messages)) if !messages.is_empty() => {
                log::debug!("Rendering {} cached messages", messages.len());
                self.show(messages);
                self.from_cache = true;
                true
            }
            Ok(_) => false,
            Err(err) => {
                log::warn!("Ignoring unreadable message cache: {err}");
                false
            }
        }
    }

    /// Number the next fetch. Results must be handed back with this number.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn apply(
        &mut self,
        seq: u64,
        result: Result<ListOutcome, GuestbookError>,
    ) -> FetchVerdict {
        if seq != self.issued {
            log::debug!("Dropping stale fetch #{seq}, newest is #{}", self.issued);
            return FetchVerdict::Stale;
        }

        match result {
            Ok(ListOutcome::Messages(messages)) if !messages.is_empty() => {
                if let Some(cache) = &self.cache {
                    if let Err(err) = cache.store_messages(&messages) {
                        log::warn!("Failed to cache messages: {err}");
                    }
                }
                log::info!("Loaded {} messages", messages.len());
                self.show(messages);
                FetchVerdict::Rendered
            }
            Ok(ListOutcome::Messages(_)) => {
                self.placeholder_unless_cached(EMPTY_TEXT);
                FetchVerdict::Empty
            }
            Ok(ListOutcome::Rejected(reason)) => {
                log::warn!(
                    "Endpoint refused listing: {}",
                    reason.as_deref().unwrap_or("no reason given")
                );
                self.placeholder_unless_cached(EMPTY_TEXT);
                FetchVerdict::Rejected(reason)
            }
            Err(err) => {
                log::error!("Failed to load messages: {err}");
                self.placeholder_unless_content(FAILED_TEXT);
                FetchVerdict::Failed
            }
        }
    }

    pub fn clear_cache(&self) -> Result<(), GuestbookError> {
        if let Some(cache) = &self.cache {
            cache.clear()?;
        }
        Ok(())
    }

    fn show(&mut self, mut messages: Vec<GuestbookMessage>) {
        messages.reverse();
        self.board = Board::Messages(messages);
        self.from_cache = false;
    }

    /// Only a cached rendering survives an empty answer.
    fn placeholder_unless_cached(&mut self, text: &'static str) {
        if !(self.from_cache && self.has_content()) {
            self.board = Board::Placeholder(text);
            self.from_cache = false;
        }
    }

    fn placeholder_unless_content(&mut self, text: &'static str) {
        if !self.has_content() {
            self.board = Board::Placeholder(text);
        }
    }
}

/// Run one fetch to completion against `remote`.
pub async fn refresh_via<R: Remote>(
    lister: &mut Lister,
    password: Option<&str>,
    remote: &R,
) -> FetchVerdict {
    let seq = lister.begin_fetch();
    let result = remote.fetch_messages(password).await;
    lister.apply(seq, result)
}
