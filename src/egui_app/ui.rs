//! egui renderer for the application UI.

mod chat_panel;
mod feature_panel;
mod layout;
mod manual_form;
mod results_table;
mod settings;
pub mod style;
mod upload_panel;

use std::time::Duration;

use eframe::egui;

use crate::egui_app::controller::EguiController;

/// Smallest window that still fits the two-column manual form.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(960.0, 640.0);

/// How often to repaint while a request is outstanding.
const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create a new egui app, loading persisted configuration.
    pub fn new() -> Result<Self, String> {
        let controller = EguiController::load_configuration()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self::with_controller(controller))
    }

    pub fn with_controller(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    /// A CSV dropped onto the window becomes the upload.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.iter().find_map(|file| file.path.clone()));
        if let Some(path) = dropped {
            self.controller.set_csv_path(&path);
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.handle_dropped_files(ctx);
        self.render_panels(ctx);
        self.render_settings_window(ctx);
        if self.controller.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}
