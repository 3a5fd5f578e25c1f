use eframe::egui;

use crate::guestbook::{Board, render_messages};

pub fn render(ui: &mut egui::Ui, board: &Board) {
    let messages = match board {
        Board::Loading => {
            ui.label(crate::guestbook::listing::LOADING_TEXT);
            return;
        }
        Board::Placeholder(text) => {
            ui.label(egui::RichText::new(*text).weak());
            return;
        }
        Board::Messages(messages) => messages,
    };

    let rows = render_messages(messages, chrono::Utc::now());
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for row in &rows {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(&row.name).strong());
                    ui.label(&row.text);
                    if !row.when.is_empty() {
                        ui.label(egui::RichText::new(&row.when).small().weak());
                    }
                });
                ui.add_space(4.0);
            }
        });
}
