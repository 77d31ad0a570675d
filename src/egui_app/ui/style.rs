use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::predictions::{BadgeStyle, ResultTone};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_ice: Color32,
    pub accent_violet: Color32,
    pub success: Color32,
    pub primary: Color32,
    pub warning: Color32,
    pub danger: Color32,
    pub secondary: Color32,
    pub dark: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(8, 10, 20),
        bg_secondary: Color32::from_rgb(18, 22, 38),
        bg_tertiary: Color32::from_rgb(34, 40, 62),
        panel_outline: Color32::from_rgb(46, 54, 82),
        grid_soft: Color32::from_rgb(26, 30, 48),
        text_primary: Color32::from_rgb(214, 220, 235),
        text_muted: Color32::from_rgb(140, 148, 170),
        accent_ice: Color32::from_rgb(167, 217, 255),
        accent_violet: Color32::from_rgb(150, 120, 255),
        success: Color32::from_rgb(40, 167, 69),
        primary: Color32::from_rgb(0, 123, 255),
        warning: Color32::from_rgb(255, 193, 7),
        danger: Color32::from_rgb(220, 53, 69),
        secondary: Color32::from_rgb(108, 117, 125),
        dark: Color32::from_rgb(52, 58, 64),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_ice;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.grid_soft;
    visuals.error_fg_color = palette.danger;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.bg_tertiary;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_ice);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    set_rounded(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::same(6);
    visuals.menu_corner_radius = CornerRadius::same(4);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(4);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.grid_soft;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn section_border() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

/// Tone of the footer status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

impl StatusTone {
    pub fn label(self) -> &'static str {
        match self {
            StatusTone::Idle => "Idle",
            StatusTone::Busy => "Working",
            StatusTone::Info => "Info",
            StatusTone::Warning => "Warning",
            StatusTone::Error => "Error",
        }
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 42),
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => palette.danger,
    }
}

/// Fill and text colors for a class badge in the result table.
pub fn class_badge_colors(style: BadgeStyle) -> (Color32, Color32) {
    let palette = palette();
    match style {
        BadgeStyle::Success => (palette.success, Color32::WHITE),
        BadgeStyle::Primary => (palette.primary, Color32::WHITE),
        BadgeStyle::Danger => (palette.danger, Color32::WHITE),
        BadgeStyle::Warning => (palette.warning, Color32::BLACK),
        BadgeStyle::Secondary => (palette.secondary, Color32::WHITE),
        BadgeStyle::Dark => (palette.dark, Color32::WHITE),
        BadgeStyle::Neutral => (palette.bg_tertiary, palette.text_primary),
    }
}

pub fn result_tone_color(tone: ResultTone) -> Color32 {
    let palette = palette();
    match tone {
        ResultTone::Success => palette.success,
        ResultTone::Warning => palette.warning,
        ResultTone::Danger => palette.danger,
    }
}
