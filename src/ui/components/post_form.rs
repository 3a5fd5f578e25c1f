use eframe::egui;

use crate::guestbook::{StatusKind, SubmitForm};

/// Draw the form. Returns true when the user asked to send.
pub fn render(ui: &mut egui::Ui, form: &mut SubmitForm) -> bool {
    let mut send = false;

    ui.label("Name");
    ui.add(egui::TextEdit::singleline(&mut form.name).hint_text("Your name"));

    ui.add_space(6.0);
    ui.label("Message");
    ui.add(
        egui::TextEdit::multiline(&mut form.message)
            .desired_rows(4)
            .hint_text("Leave a message"),
    );

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(form.can_submit(), egui::Button::new("Send"))
            .clicked()
        {
            send = true;
        }

        if let Some(status) = form.status() {
            let color = match status.kind {
                StatusKind::Sending => egui::Color32::LIGHT_BLUE,
                StatusKind::Success => egui::Color32::GREEN,
                StatusKind::Error => egui::Color32::RED,
            };
            ui.colored_label(color, &status.text);
        }
    });

    send
}
