use eframe::egui::{self, RichText};

use super::EguiApp;
use super::layout::{error_label, section};
use super::style;
use crate::sample_data;

impl EguiApp {
    pub(super) fn render_upload_section(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let mission = self.controller.session().mission();
        section(ui, "Batch prediction from CSV", |ui| {
            ui.label(
                RichText::new(format!(
                    "Upload a {mission} CSV to classify every row with the {mission} model."
                ))
                .color(palette.text_muted),
            );
            ui.add_space(6.0);
            let loading = self.controller.ui.upload.loading;
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!loading, egui::Button::new("Choose CSV…"))
                    .clicked()
                {
                    self.controller.choose_csv_via_dialog();
                }
                if ui
                    .button(format!("Save {}", sample_data::sample_file_name(mission)))
                    .on_hover_text("Write a small example file for this mission")
                    .clicked()
                {
                    self.controller.save_sample_via_dialog();
                }
            });
            let file_info = self
                .controller
                .session()
                .upload()
                .map(|upload| (upload.file_name.clone(), upload.size_label()));
            if let Some((name, size)) = file_info {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(name).strong());
                    ui.label(RichText::new(size).color(palette.text_muted));
                    if ui
                        .add_enabled(!loading, egui::Button::new("Remove"))
                        .clicked()
                    {
                        self.controller.remove_csv();
                    }
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if loading {
                        ui.spinner();
                        ui.label("Analyzing your data…");
                    } else if ui.button(RichText::new("Predict").strong()).clicked() {
                        self.controller.predict_csv();
                    }
                });
            }
            error_label(ui, self.controller.ui.upload.error.as_deref());
        });
    }
}
