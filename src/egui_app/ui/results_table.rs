use eframe::egui::{self, RichText};

use super::EguiApp;
use super::layout::section;
use super::style;
use crate::predictions::{BadgeView, HeaderView, SortColumn};

impl EguiApp {
    pub(super) fn render_results_section(&mut self, ui: &mut egui::Ui) {
        let view = self.controller.session().table().render();
        if !view.visible {
            return;
        }
        let palette = style::palette();
        let downloading = self.controller.ui.download_in_progress;
        let mut clicked: Option<SortColumn> = None;
        section(ui, "Prediction results", |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&view.count_label).color(palette.text_muted));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if downloading {
                        ui.spinner();
                    } else if ui.button("Download CSV").clicked() {
                        self.controller.download_results_via_dialog();
                    }
                });
            });
            ui.add_space(6.0);
            let visible_headers: Vec<&HeaderView> =
                view.headers.iter().filter(|header| header.visible).collect();
            let show_secondary = visible_headers
                .iter()
                .any(|header| header.column == Some(SortColumn::SecondaryIdentifier));
            egui::ScrollArea::vertical()
                .id_salt("results_scroll")
                .max_height(420.0)
                .show(ui, |ui| {
                    egui::Grid::new(("results_grid", view.mission.id()))
                        .num_columns(visible_headers.len())
                        .striped(true)
                        .spacing([18.0, 6.0])
                        .show(ui, |ui| {
                            for header in &visible_headers {
                                if let Some(column) = header_cell(ui, header) {
                                    clicked = Some(column);
                                }
                            }
                            ui.end_row();
                            for row in &view.rows {
                                badge(ui, &row.badge);
                                ui.label(&row.confidence);
                                ui.label(&row.identifiers[0]);
                                if show_secondary {
                                    ui.label(&row.identifiers[1]);
                                }
                                ui.label(RichText::new(&row.row_id).color(palette.text_muted));
                                ui.end_row();
                            }
                        });
                });
        });
        if let Some(column) = clicked {
            self.controller.sort_results(column);
        }
    }
}

/// Draw a header; returns the column when a sortable header was clicked.
fn header_cell(ui: &mut egui::Ui, header: &HeaderView) -> Option<SortColumn> {
    let Some(column) = header.column else {
        ui.label(RichText::new(header.label).strong());
        return None;
    };
    let text = match header.sorted {
        Some(direction) => format!("{} {}", header.label, direction.arrow()),
        None => format!("{} ⇅", header.label),
    };
    let response = ui
        .add(egui::Button::new(RichText::new(text).strong()).frame(false))
        .on_hover_text("Click to sort");
    response.clicked().then_some(column)
}

fn badge(ui: &mut egui::Ui, badge: &BadgeView) {
    let (fill, text) = style::class_badge_colors(badge.style);
    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(&badge.label).color(text).strong());
        });
}
