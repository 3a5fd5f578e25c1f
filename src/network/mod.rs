pub mod client;
pub mod envelope;
#[cfg(test)]
pub mod fake;
pub mod remote;

pub use client::GuestbookClient;
pub use envelope::ListOutcome;
pub use remote::{HttpRemote, Remote};
