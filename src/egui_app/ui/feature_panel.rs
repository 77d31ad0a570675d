use eframe::egui::{self, RichText};

use super::EguiApp;
use super::layout::section;
use super::style;

const CHECKLIST_COLUMNS: usize = 3;

impl EguiApp {
    pub(super) fn render_feature_section(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let mission = self.controller.session().mission();
        section(ui, "Model features", |ui| {
            let summary = self
                .controller
                .session()
                .features()
                .feature_count_summary(mission);
            ui.horizontal(|ui| {
                ui.label(RichText::new(summary).color(palette.text_muted));
                let open = self.controller.ui.features.advanced_open;
                let label = if open {
                    "Hide advanced selection"
                } else {
                    "Advanced selection"
                };
                if ui.button(label).clicked() {
                    self.controller.set_advanced_features_open(!open);
                }
            });
            if !self.controller.ui.features.advanced_open {
                return;
            }
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Select all").clicked() {
                    self.controller.select_all_features();
                }
                if ui.button("Deselect all").clicked() {
                    self.controller.deselect_all_features();
                }
            });
            ui.add_space(4.0);
            let checklist = mission.feature_checklist();
            egui::Grid::new(("feature_checklist", mission.id()))
                .num_columns(CHECKLIST_COLUMNS)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for (index, feature) in checklist.iter().enumerate() {
                        let mut checked = self
                            .controller
                            .session()
                            .features()
                            .is_selected(mission, feature);
                        if ui.checkbox(&mut checked, *feature).changed() {
                            self.controller.toggle_feature(feature, checked);
                        }
                        if (index + 1) % CHECKLIST_COLUMNS == 0 {
                            ui.end_row();
                        }
                    }
                });
        });
    }
}
