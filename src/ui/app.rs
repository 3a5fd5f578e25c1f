use std::io;
use std::time::{Duration, Instant};

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{NetworkCommand, NetworkEvent, SendMode};
use crate::config::AppConfig;
use crate::error::GuestbookError;
use crate::guestbook::{Lister, PasswordGate, SubmitForm};

use super::components::{message_list, password_gate, post_form};
use super::state::{AppState, Page};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub struct GuestbookApp {
    state: AppState,
    refresh_interval: Option<Duration>,
    last_fetch: Option<Instant>,
    command_sender: mpsc::Sender<NetworkCommand>,
    event_receiver: mpsc::Receiver<NetworkEvent>,
}

impl GuestbookApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        lister: Lister,
        command_sender: mpsc::Sender<NetworkCommand>,
        event_receiver: mpsc::Receiver<NetworkEvent>,
    ) -> Self {
        let form = SubmitForm::new(config.send_mode, config.status_hide());
        let gate = PasswordGate::new(config.password_gate);

        let mut app = Self {
            state: AppState::new(form, lister, gate),
            refresh_interval: config.refresh_interval(),
            last_fetch: None,
            command_sender,
            event_receiver,
        };

        // Cached content would bypass the gate, so gated boards start empty.
        if !app.state.gate.is_required() {
            app.state.lister.restore_from_cache();
            app.request_fetch(None);
        }
        app
    }

    fn handle_network_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                NetworkEvent::SubmitFinished(result) => {
                    let accepted = result.is_ok();
                    self.state.form.finish(result, Instant::now());
                    if accepted {
                        self.refresh();
                    }
                }
                NetworkEvent::SubmitSettled => {
                    self.state.form.settle();
                    self.refresh();
                }
                NetworkEvent::MessagesFetched { seq, result } => {
                    let verdict = self.state.lister.apply(seq, result);
                    self.state.gate.record(&verdict);
                }
            }
        }
    }

    fn submit(&mut self) {
        let Some(entry) = self.state.form.begin_submit(Instant::now()) else {
            return;
        };
        let mode = self.state.form.mode();

        if let Err(err) = self
            .command_sender
            .try_send(NetworkCommand::Submit { entry, mode })
        {
            log::warn!("Failed to send command to network: {err}");
            match mode {
                SendMode::Confirmed => self
                    .state
                    .form
                    .finish(Err(unavailable()), Instant::now()),
                SendMode::Optimistic => self.state.form.settle(),
            }
        }
    }

    /// Refetch with whatever password the gate currently holds.
    fn refresh(&mut self) {
        if !self.state.gate.is_open() {
            return;
        }
        let password = self.state.gate.password().map(str::to_string);
        self.request_fetch(password);
    }

    fn unlock(&mut self) {
        if let Some(password) = self.state.gate.attempt() {
            self.request_fetch(Some(password));
        }
    }

    fn request_fetch(&mut self, password: Option<String>) {
        let seq = self.state.lister.begin_fetch();
        self.last_fetch = Some(Instant::now());

        if let Err(err) = self
            .command_sender
            .try_send(NetworkCommand::FetchMessages { seq, password })
        {
            log::warn!("Failed to send command to network: {err}");
            let verdict = self.state.lister.apply(seq, Err(unavailable()));
            self.state.gate.record(&verdict);
        }
    }

    fn refresh_if_due(&mut self) {
        let (Some(interval), Some(last)) = (self.refresh_interval, self.last_fetch) else {
            return;
        };
        if last.elapsed() >= interval {
            self.refresh();
        }
    }
}

fn unavailable() -> GuestbookError {
    GuestbookError::Io(io::Error::other("network task unavailable"))
}

impl eframe::App for GuestbookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();
        self.state.form.tick(Instant::now());
        self.refresh_if_due();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.state.page, Page::Post, "Post");
                ui.selectable_value(&mut self.state.page, Page::View, "View");
            });
            ui.separator();

            match self.state.page {
                Page::Post => {
                    ui.heading("Leave a message");
                    if post_form::render(ui, &mut self.state.form) {
                        self.submit();
                    }
                }
                Page::View => {
                    ui.horizontal(|ui| {
                        ui.heading("Messages");
                        if self.state.gate.is_open() && ui.button("Refresh").clicked() {
                            self.refresh();
                        }
                    });
                    ui.separator();

                    if self.state.gate.is_open() {
                        message_list::render(ui, self.state.lister.board());
                    } else if password_gate::render(ui, &mut self.state.gate) {
                        self.unlock();
                    }
                }
            }
        });

        password_gate::render_alert(ctx, &mut self.state.gate);

        let wake = self
            .state
            .form
            .hide_deadline()
            .map_or(POLL_INTERVAL, |deadline| {
                deadline
                    .saturating_duration_since(Instant::now())
                    .min(POLL_INTERVAL)
            });
        ctx.request_repaint_after(wake);
    }
}
