use eframe::egui::{self, RichText, TopBottomPanel};

use super::EguiApp;
use super::style;
use crate::mission::Mission;

impl EguiApp {
    pub(super) fn render_panels(&mut self, ctx: &egui::Context) {
        self.render_top_bar(ctx);
        self.render_status(ctx);
        if self.controller.settings().ui.chat_enabled && self.controller.ui.chat.open {
            egui::SidePanel::right("assistant")
                .resizable(true)
                .default_width(340.0)
                .min_width(260.0)
                .show(ctx, |ui| self.render_chat_panel(ui));
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_upload_section(ui);
                    ui.add_space(12.0);
                    self.render_feature_section(ui);
                    ui.add_space(12.0);
                    self.render_results_section(ui);
                    ui.add_space(12.0);
                    self.render_manual_section(ui);
                });
        });
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        TopBottomPanel::top("mission_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("ExoFinder")
                        .heading()
                        .color(palette.accent_ice),
                );
                ui.separator();
                ui.label(RichText::new("Mission").color(palette.text_muted));
                let current = self.controller.session().mission();
                for mission in Mission::ALL {
                    if ui
                        .selectable_label(current == mission, mission.display_name())
                        .clicked()
                        && current != mission
                    {
                        self.controller.select_mission(mission);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        self.controller.open_settings();
                    }
                    if self.controller.settings().ui.chat_enabled {
                        let label = if self.controller.ui.chat.open {
                            "Hide ExoAI"
                        } else {
                            "Ask ExoAI"
                        };
                        if ui.button(label).clicked() {
                            self.controller.toggle_chat();
                        }
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).strong());
                    ui.separator();
                    ui.label(&status.text);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        const APP_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));
                        ui.label(RichText::new(APP_VERSION).color(palette.text_muted));
                    });
                });
            });
    }
}

/// Titled, bordered block used for each main section.
pub(super) fn section<R>(
    ui: &mut egui::Ui,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let palette = style::palette();
    egui::Frame::group(ui.style())
        .stroke(style::section_border())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).strong().size(16.0).color(palette.accent_ice));
            ui.add_space(6.0);
            add_contents(ui)
        })
        .inner
}

/// Inline error line under a section's controls.
pub(super) fn error_label(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(error) = error {
        ui.add_space(4.0);
        ui.label(RichText::new(error).color(style::palette().danger));
    }
}
