use std::sync::Arc;

use tokio::sync::mpsc;

use crate::common::{NetworkCommand, NetworkEvent, SendMode};

use super::remote::Remote;

/// Background task that runs UI commands against the remote endpoint.
///
/// Every command gets its own spawned task, so a listing is never queued
/// behind a slow submission. Results go back as [`NetworkEvent`]s.
pub struct GuestbookClient<R: Remote> {
    remote: Arc<R>,
    event_sender: mpsc::Sender<NetworkEvent>,
    command_receiver: mpsc::Receiver<NetworkCommand>,
}

impl<R: Remote> GuestbookClient<R> {
    pub fn new(
        remote: Arc<R>,
        event_sender: mpsc::Sender<NetworkEvent>,
        command_receiver: mpsc::Receiver<NetworkCommand>,
    ) -> Self {
        Self {
            remote,
            event_sender,
            command_receiver,
        }
    }

    pub async fn run(mut self) {
        log::info!("Network event loop started");

        while let Some(command) = self.command_receiver.recv().await {
            self.handle_command(command);
        }

        log::info!("Command channel closed, network loop exiting");
    }

    fn handle_command(&self, command: NetworkCommand) {
        let remote = Arc::clone(&self.remote);
        let event_sender = self.event_sender.clone();

        match command {
            NetworkCommand::Submit {
                entry,
                mode: SendMode::Confirmed,
            } => {
                tokio::spawn(async move {
                    let result = remote.post_message(&entry).await;
                    match &result {
                        Err(err) if err.is_transport() => log::error!("Submission failed: {err}"),
                        Err(err) => log::warn!("Endpoint refused submission: {err}"),
                        Ok(_) => log::info!("Submission accepted"),
                    }
                    notify(&event_sender, NetworkEvent::SubmitFinished(result)).await;
                });
            }
            NetworkCommand::Submit {
                entry,
                mode: SendMode::Optimistic,
            } => {
                tokio::spawn(async move {
                    if let Err(err) = remote.send_beacon(&entry).await {
                        log::error!("Optimistic send failed: {err}");
                    }
                    notify(&event_sender, NetworkEvent::SubmitSettled).await;
                });
            }
            NetworkCommand::FetchMessages { seq, password } => {
                tokio::spawn(async move {
                    let result = remote.fetch_messages(password.as_deref()).await;
                    if let Err(err) = &result {
                        log::error!("Fetch #{seq} failed: {err}");
                    }
                    notify(&event_sender, NetworkEvent::MessagesFetched { seq, result }).await;
                });
            }
        }
    }
}

async fn notify(sender: &mpsc::Sender<NetworkEvent>, event: NetworkEvent) {
    if let Err(err) = sender.send(event).await {
        log::warn!("Failed to notify UI: {err}");
    }
}
