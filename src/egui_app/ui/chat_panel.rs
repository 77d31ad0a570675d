use eframe::egui::{self, RichText};

use super::EguiApp;
use super::style;
use crate::chat::{ChatRole, MAX_MESSAGE_CHARS};

impl EguiApp {
    pub(super) fn render_chat_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.horizontal(|ui| {
            ui.label(RichText::new("ExoAI assistant").strong().color(palette.accent_ice));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(
                        !self.controller.chat().awaiting_reply(),
                        egui::Button::new("New chat"),
                    )
                    .clicked()
                {
                    self.controller.reset_chat();
                }
            });
        });
        ui.separator();
        let input_height = 72.0;
        egui::ScrollArea::vertical()
            .id_salt("chat_scroll")
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .max_height((ui.available_height() - input_height).max(80.0))
            .show(ui, |ui| {
                for message in self.controller.chat().messages() {
                    let (fill, align) = match message.role {
                        ChatRole::User => (palette.bg_tertiary, egui::Align::Max),
                        ChatRole::Assistant => (palette.grid_soft, egui::Align::Min),
                    };
                    let text_color = if message.is_error {
                        palette.danger
                    } else {
                        palette.text_primary
                    };
                    ui.with_layout(egui::Layout::top_down(align), |ui| {
                        egui::Frame::new()
                            .fill(fill)
                            .corner_radius(egui::CornerRadius::same(6))
                            .inner_margin(egui::Margin::symmetric(8, 6))
                            .show(ui, |ui| {
                                ui.set_max_width(ui.available_width() * 0.85);
                                ui.label(RichText::new(&message.text).color(text_color));
                            });
                    });
                    ui.add_space(4.0);
                }
                if self.controller.chat().awaiting_reply() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(RichText::new("ExoAI is thinking…").color(palette.text_muted));
                    });
                }
            });
        ui.separator();
        self.render_chat_input(ui);
    }

    fn render_chat_input(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let waiting = self.controller.chat().awaiting_reply();
        let mut submit = false;
        ui.horizontal(|ui| {
            let response = ui.add_enabled(
                !waiting,
                egui::TextEdit::singleline(&mut self.controller.ui.chat.input)
                    .hint_text("Ask about exoplanets…")
                    .desired_width(ui.available_width() - 60.0),
            );
            if self.controller.ui.chat.focus_input_requested && !waiting {
                response.request_focus();
                self.controller.ui.chat.focus_input_requested = false;
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            if ui
                .add_enabled(!waiting, egui::Button::new("Send"))
                .clicked()
            {
                submit = true;
            }
        });
        let used = self.controller.ui.chat.input.chars().count();
        ui.label(
            RichText::new(format!("{used}/{MAX_MESSAGE_CHARS}"))
                .small()
                .color(if used > MAX_MESSAGE_CHARS {
                    palette.danger
                } else {
                    palette.text_muted
                }),
        );
        if let Some(error) = &self.controller.ui.chat.error {
            ui.label(RichText::new(error).color(palette.danger));
        }
        if submit {
            self.controller.send_chat();
        }
    }
}
