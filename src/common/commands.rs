use super::types::{NewEntry, SendMode};

/// Requests from the UI to the network task.
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    Submit {
        entry: NewEntry,
        mode: SendMode,
    },
    /// Fetch the message collection.
    /// - seq: sequence number issued by the lister, echoed back in the result
    /// - password: sent as a query parameter when the view is gated
    FetchMessages {
        seq: u64,
        password: Option<String>,
    },
}
