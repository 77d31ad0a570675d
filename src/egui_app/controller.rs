//! Maintains app state and bridges the session, backend client and
//! background jobs to the egui UI.

mod background_jobs;
mod jobs;

use std::path::{Path, PathBuf};

use rfd::FileDialog;

use crate::backend::{self, BackendClient, BackendError, Endpoint};
use crate::chat::ChatSession;
use crate::config::{self, AppSettings, ConfigError};
use crate::egui_app::state::UiState;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::mission::Mission;
use crate::predictions::SortColumn;
use crate::sample_data;
use crate::session::{RequestKind, Session};
use crate::upload::CsvUpload;
use jobs::{ControllerJobs, DownloadJob};

/// Suggested name for exported results.
pub const DEFAULT_DOWNLOAD_NAME: &str = "exoplanet_predictions.csv";

pub struct EguiController {
    pub ui: UiState,
    session: Session,
    chat: ChatSession,
    settings: AppSettings,
    client: Option<BackendClient>,
    jobs: ControllerJobs,
}

impl EguiController {
    pub fn new(settings: AppSettings) -> Self {
        let mut controller = Self {
            ui: UiState::default(),
            session: Session::new(settings.ui.default_mission),
            chat: ChatSession::new(),
            client: None,
            jobs: ControllerJobs::new(),
            settings,
        };
        controller.ui.settings.base_url_input = controller.settings.backend.base_url.clone();
        controller.rebuild_client();
        controller
    }

    /// Build a controller from `config.toml`, falling back to defaults when
    /// the file does not exist yet.
    pub fn load_configuration() -> Result<Self, ConfigError> {
        config::load_or_default().map(Self::new)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// True while any request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.jobs.any_in_progress()
    }

    /// Switching missions abandons predictions still running for the old
    /// one, so the new mission's controls are ready straight away.
    pub fn select_mission(&mut self, mission: Mission) {
        self.session.switch_mission(mission);
        self.jobs.release_mission_scoped();
        self.ui.upload.error = None;
        self.ui.upload.loading = false;
        self.ui.manual.error = None;
        self.ui.manual.loading = false;
        self.set_status(format!("{mission} mission selected"), StatusTone::Info);
    }

    pub fn choose_csv_via_dialog(&mut self) {
        let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file() else {
            return;
        };
        self.set_csv_path(&path);
    }

    pub fn set_csv_path(&mut self, path: &Path) {
        match CsvUpload::from_path(path) {
            Ok(upload) => {
                let summary = format!("Loaded {} ({})", upload.file_name, upload.size_label());
                self.session.set_upload(upload);
                self.ui.upload.error = None;
                self.set_status(summary, StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!("Rejected upload {}: {err}", path.display());
                self.ui.upload.error = Some(err.to_string());
            }
        }
    }

    pub fn remove_csv(&mut self) {
        self.session.remove_upload();
        self.ui.upload.error = None;
        self.set_status("File removed", StatusTone::Idle);
    }

    /// Submit the chosen CSV for batch prediction.
    pub fn predict_csv(&mut self) {
        if self.jobs.csv_in_progress() {
            return;
        }
        let request = match self.session.csv_request() {
            Ok(request) => request,
            Err(err) => {
                self.ui.upload.error = Some(err.to_string());
                return;
            }
        };
        let Some(client) = self.client.clone() else {
            self.ui.upload.error = Some(self.missing_backend_message(Endpoint::PredictCsv));
            return;
        };
        let ticket = self.session.begin_request(RequestKind::CsvPrediction);
        self.ui.upload.error = None;
        self.ui.upload.loading = true;
        self.set_status(
            format!(
                "Classifying {} with the {} model",
                request.upload.file_name, request.mission
            ),
            StatusTone::Busy,
        );
        self.jobs.begin_csv_prediction(client, ticket, request);
    }

    /// Submit the manual-entry form.
    pub fn predict_manual(&mut self) {
        if self.jobs.manual_in_progress() {
            return;
        }
        if let Err(err) = self.session.form().validate() {
            self.ui.manual.error = Some(err.to_string());
            return;
        }
        let Some(client) = self.client.clone() else {
            self.ui.manual.error = Some(self.missing_backend_message(Endpoint::PredictManual));
            return;
        };
        let request = self.session.manual_request();
        let ticket = self.session.begin_request(RequestKind::ManualPrediction);
        self.ui.manual.error = None;
        self.ui.manual.loading = true;
        self.set_status(
            format!("Classifying manual {} entry", request.mission),
            StatusTone::Busy,
        );
        self.jobs.begin_manual_prediction(client, ticket, request);
    }

    pub fn form_value_mut(&mut self, index: usize) -> Option<&mut String> {
        self.session.form_mut().value_mut(index)
    }

    pub fn clear_manual_form(&mut self) {
        self.session.form_mut().clear_values();
        self.ui.manual.error = None;
    }

    pub fn sort_results(&mut self, column: SortColumn) {
        let direction = self.session.table_mut().sort_by(column);
        tracing::debug!("Sorted results by {column:?} {direction:?}");
    }

    pub fn download_results_via_dialog(&mut self) {
        if self.session.table().is_empty() {
            self.report_error(&BackendError::NoResults, Endpoint::DownloadResults);
            return;
        }
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(DEFAULT_DOWNLOAD_NAME)
            .save_file()
        else {
            return;
        };
        self.download_results_to(path);
    }

    /// Export the current results as CSV via the backend.
    pub fn download_results_to(&mut self, path: PathBuf) {
        if self.jobs.download_in_progress() {
            return;
        }
        let records = self.session.table().records().to_vec();
        if records.is_empty() {
            self.report_error(&BackendError::NoResults, Endpoint::DownloadResults);
            return;
        }
        let Some(client) = self.client.clone() else {
            let message = self.missing_backend_message(Endpoint::DownloadResults);
            self.set_status(message, StatusTone::Error);
            return;
        };
        let ticket = self.session.begin_request(RequestKind::Download);
        self.ui.download_in_progress = true;
        self.set_status(
            format!("Exporting {} results", records.len()),
            StatusTone::Busy,
        );
        self.jobs
            .begin_download(client, ticket, DownloadJob { records, path });
    }

    pub fn save_sample_via_dialog(&mut self) {
        let mission = self.session.mission();
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(sample_data::sample_file_name(mission))
            .save_file()
        else {
            return;
        };
        self.save_sample_to(&path);
    }

    pub fn save_sample_to(&mut self, path: &Path) {
        let mission = self.session.mission();
        match sample_data::write_sample(mission, path) {
            Ok(()) => self.set_status(
                format!("Saved {mission} sample data to {}", path.display()),
                StatusTone::Info,
            ),
            Err(err) => self.set_status(err.to_string(), StatusTone::Error),
        }
    }

    pub fn toggle_feature(&mut self, feature: &str, selected: bool) {
        let mission = self.session.mission();
        self.session
            .features_mut()
            .toggle_feature(mission, feature, selected);
    }

    pub fn select_all_features(&mut self) {
        let mission = self.session.mission();
        self.session.features_mut().select_all(mission);
    }

    pub fn deselect_all_features(&mut self) {
        let mission = self.session.mission();
        self.session.features_mut().deselect_all(mission);
    }

    /// Expanding the advanced checklist means its selection is sent along
    /// with every prediction for the mission.
    pub fn set_advanced_features_open(&mut self, open: bool) {
        self.ui.features.advanced_open = open;
        if open {
            let mission = self.session.mission();
            self.session.features_mut().engage(mission);
        }
    }

    pub fn toggle_chat(&mut self) {
        self.ui.chat.open = !self.ui.chat.open;
        self.ui.chat.focus_input_requested = self.ui.chat.open;
    }

    /// Send whatever is in the chat input box.
    pub fn send_chat(&mut self) {
        let Some(client) = self.client.clone() else {
            self.ui.chat.error = Some(self.missing_backend_message(Endpoint::Chat));
            return;
        };
        let input = self.ui.chat.input.clone();
        let message = match self.chat.send(&input) {
            Ok(Some(message)) => message,
            Ok(None) => return,
            Err(err) => {
                self.ui.chat.error = Some(err.to_string());
                return;
            }
        };
        self.ui.chat.input.clear();
        self.ui.chat.error = None;
        let ticket = self.session.begin_request(RequestKind::Chat);
        self.jobs.begin_chat(client, ticket, message);
    }

    pub fn reset_chat(&mut self) {
        if self.jobs.chat_in_progress() {
            return;
        }
        self.chat.reset();
        self.ui.chat.error = None;
    }

    pub fn open_settings(&mut self) {
        self.ui.settings.open = true;
        self.ui.settings.base_url_input = self.settings.backend.base_url.clone();
        self.ui.settings.error = None;
    }

    pub fn close_settings(&mut self) {
        self.ui.settings.open = false;
        self.ui.settings.error = None;
    }

    /// Validate and persist the backend URL typed into the settings window.
    pub fn apply_backend_url(&mut self) {
        let input = self.ui.settings.base_url_input.trim().to_string();
        if let Err(err) = backend::parse_base_url(&input) {
            self.ui.settings.error = Some(err.to_string());
            return;
        }
        self.settings.backend.base_url = input;
        self.rebuild_client();
        self.ui.settings.open = false;
        self.ui.settings.error = None;
        match config::save(&self.settings) {
            Ok(()) => self.set_status(
                format!("Backend set to {}", self.settings.backend.base_url),
                StatusTone::Info,
            ),
            Err(err) => self.set_status(
                format!("Backend updated but settings were not saved: {err}"),
                StatusTone::Warning,
            ),
        }
    }

    fn rebuild_client(&mut self) {
        match BackendClient::new(&self.settings.backend) {
            Ok(client) => {
                tracing::info!("Using backend at {}", client.base_url());
                self.client = Some(client);
            }
            Err(err) => {
                tracing::error!("Backend disabled: {err}");
                self.client = None;
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }

    fn missing_backend_message(&self, endpoint: Endpoint) -> String {
        format!(
            "{}no valid backend URL configured ({})",
            endpoint.failure_prefix(),
            self.settings.backend.base_url
        )
    }

    fn report_error(&mut self, err: &BackendError, endpoint: Endpoint) {
        let text = err.user_message(endpoint);
        let tone = match err {
            BackendError::NoResults => StatusTone::Warning,
            _ => StatusTone::Error,
        };
        self.set_status(text, tone);
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.badge_label = tone.label().into();
        self.ui.status.badge_color = style::status_badge_color(tone);
    }
}
