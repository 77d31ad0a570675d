use eframe::egui::{self, RichText};

use super::EguiApp;
use super::layout::{error_label, section};
use super::style;
use crate::mission::{FieldDescriptor, InputKind, Step};
use crate::predictions::ManualResultView;

impl EguiApp {
    pub(super) fn render_manual_section(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let layout = self.controller.session().form().layout().clone();
        section(ui, "Manual entry", |ui| {
            ui.label(
                RichText::new(format!(
                    "Enter {} observations for a single candidate. Blank fields are sent empty.",
                    layout.mission()
                ))
                .color(palette.text_muted),
            );
            ui.add_space(6.0);
            let [left, right] = layout.columns();
            let split = layout.split_index();
            ui.columns(2, |columns| {
                self.render_field_column(&mut columns[0], left, 0);
                self.render_field_column(&mut columns[1], right, split);
            });
            ui.add_space(8.0);
            let loading = self.controller.ui.manual.loading;
            ui.horizontal(|ui| {
                if loading {
                    ui.spinner();
                    ui.label("Classifying…");
                } else if ui.button(RichText::new("Predict").strong()).clicked() {
                    self.controller.predict_manual();
                }
                if ui
                    .add_enabled(!loading, egui::Button::new("Clear"))
                    .clicked()
                {
                    self.controller.clear_manual_form();
                }
            });
            error_label(ui, self.controller.ui.manual.error.as_deref());
            if let Some(result) = self.controller.session().manual_result() {
                ui.add_space(10.0);
                render_manual_result(ui, &result.render());
            }
        });
    }

    fn render_field_column(
        &mut self,
        ui: &mut egui::Ui,
        fields: &[FieldDescriptor],
        offset: usize,
    ) {
        let palette = style::palette();
        let mission = self.controller.session().mission();
        egui::Grid::new(("manual_fields", mission.id(), offset))
            .num_columns(2)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                for (index, field) in fields.iter().enumerate() {
                    ui.label(field.label).on_hover_text(field.name);
                    let Some(value) = self.controller.form_value_mut(offset + index) else {
                        ui.end_row();
                        continue;
                    };
                    let edit = match field.input_kind {
                        InputKind::Number => {
                            let color = if field.accepts(value) {
                                palette.text_primary
                            } else {
                                palette.danger
                            };
                            egui::TextEdit::singleline(value).text_color(color)
                        }
                    };
                    ui.add(edit.hint_text(field.placeholder).desired_width(140.0))
                        .on_hover_text(range_hint(field));
                    ui.end_row();
                }
            });
    }
}

fn render_manual_result(ui: &mut egui::Ui, view: &ManualResultView) {
    let palette = style::palette();
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(&view.prediction)
                .size(18.0)
                .strong()
                .color(style::result_tone_color(view.tone)),
        );
        ui.label(
            RichText::new(format!("Confidence: {}", view.confidence)).color(palette.text_muted),
        );
    });
    for probability in &view.probabilities {
        ui.horizontal(|ui| {
            ui.add_sized(
                [220.0, 18.0],
                egui::Label::new(&probability.class_name).truncate(),
            );
            ui.add(
                egui::ProgressBar::new(probability.fraction)
                    .desired_width(220.0)
                    .fill(palette.accent_violet)
                    .text(&probability.label),
            );
        });
    }
}

fn range_hint(field: &FieldDescriptor) -> String {
    let mut parts = vec![field.name.to_string()];
    match (field.min, field.max) {
        (Some(min), Some(max)) => parts.push(format!("range {min} to {max}")),
        (Some(min), None) => parts.push(format!("at least {min}")),
        (None, Some(max)) => parts.push(format!("at most {max}")),
        (None, None) => {}
    }
    if let Some(Step::Fixed(step)) = field.step {
        parts.push(format!("step {step}"));
    }
    parts.join(", ")
}
