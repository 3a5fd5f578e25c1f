use crate::error::GuestbookError;
use crate::network::ListOutcome;

use super::types::SubmitReceipt;

/// Results from the network task back to the UI.
#[derive(Debug)]
pub enum NetworkEvent {
    SubmitFinished(Result<SubmitReceipt, GuestbookError>),
    /// An optimistic send completed, whatever its outcome.
    SubmitSettled,
    MessagesFetched {
        seq: u64,
        result: Result<ListOutcome, GuestbookError>,
    },
}
