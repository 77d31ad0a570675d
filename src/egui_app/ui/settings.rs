use eframe::egui::{self, Align2, RichText};

use super::EguiApp;
use super::style;

impl EguiApp {
    /// Backend URL editor.
    pub(super) fn render_settings_window(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.settings.open {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.close_settings();
            return;
        }
        let palette = style::palette();
        let mut open = true;
        let mut apply = false;
        let mut cancel = false;
        egui::Window::new("Backend settings")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("Base URL of the ExoFinder inference service")
                        .color(palette.text_muted),
                );
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.controller.ui.settings.base_url_input)
                        .hint_text("http://127.0.0.1:5000")
                        .desired_width(f32::INFINITY),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    apply = true;
                }
                if let Some(error) = &self.controller.ui.settings.error {
                    ui.label(RichText::new(error).color(palette.danger));
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        apply = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
        if !open || cancel {
            self.controller.close_settings();
        } else if apply {
            self.controller.apply_backend_url();
        }
    }
}
