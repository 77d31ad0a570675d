//! Shared state types for the egui UI.

use egui::Color32;

use crate::egui_app::ui::style::{self, StatusTone};

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub upload: UploadPanelState,
    pub manual: ManualPanelState,
    pub features: FeaturePanelState,
    pub chat: ChatPanelState,
    pub settings: SettingsState,
    pub download_in_progress: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            upload: UploadPanelState::default(),
            manual: ManualPanelState::default(),
            features: FeaturePanelState::default(),
            chat: ChatPanelState::default(),
            settings: SettingsState::default(),
            download_in_progress: false,
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Choose a mission and upload a CSV to get started".into(),
            badge_label: StatusTone::Idle.label().into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
        }
    }
}

/// CSV upload section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadPanelState {
    /// Inline validation or backend error for the batch prediction.
    pub error: Option<String>,
    pub loading: bool,
}

/// Manual entry section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualPanelState {
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeaturePanelState {
    /// Advanced checklist expanded.
    pub advanced_open: bool,
}

/// Assistant side panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatPanelState {
    pub open: bool,
    pub input: String,
    /// Client-side rejection of the last attempted message.
    pub error: Option<String>,
    pub focus_input_requested: bool,
}

/// Backend settings window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsState {
    pub open: bool,
    pub base_url_input: String,
    pub error: Option<String>,
}
