use eframe::egui;

use crate::guestbook::PasswordGate;

/// Draw the password prompt. Returns true when the user submitted it.
pub fn render(ui: &mut egui::Ui, gate: &mut PasswordGate) -> bool {
    let mut unlock = false;

    ui.label("This board is password protected.");
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut gate.input)
                .password(true)
                .hint_text("Password"),
        );
        if ui.button("Unlock").clicked() {
            unlock = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            unlock = true;
        }
    });

    unlock
}

/// Modal-style alert for gate errors.
pub fn render_alert(ctx: &egui::Context, gate: &mut PasswordGate) {
    let Some(alert) = gate.alert() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new("Alert")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(alert);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        gate.dismiss_alert();
    }
}
