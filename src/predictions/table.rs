//! Result table controller and its pure view projection.

use super::sort::{self, SortColumn, SortDirection, SortState};
use super::PredictionRecord;
use crate::mission::Mission;

/// Text shown for any absent field.
pub const PLACEHOLDER: &str = "N/A";

/// Badge styling for a predicted class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeStyle {
    Success,
    Primary,
    Danger,
    Warning,
    Secondary,
    Dark,
    /// Any class outside the known label set.
    Neutral,
}

impl BadgeStyle {
    pub fn for_class(class: &str) -> BadgeStyle {
        match class {
            "CONFIRMED" | "Confirmed Planet" | "Known Planet" | "CP" | "KP" => BadgeStyle::Success,
            "CANDIDATE" | "Planet Candidate" | "PC" | "PLANET/CANDIDATE" => BadgeStyle::Primary,
            "FALSE POSITIVE" | "FP" | "NOT PLANET" => BadgeStyle::Danger,
            "FALSE ALARM" => BadgeStyle::Warning,
            "ASTROPHYSICAL FALSE POSITIVE" | "AFP" => BadgeStyle::Secondary,
            "UNKNOWN" => BadgeStyle::Dark,
            _ => BadgeStyle::Neutral,
        }
    }
}

/// Format a `[0, 1]` confidence as a percentage with one decimal place.
/// Exact halves round away from zero (`0.5625` is `"56.3%"`), not to even.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", (confidence * 1000.0).round() / 10.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct BadgeView {
    pub label: String,
    pub style: BadgeStyle,
}

/// One rendered table row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowView {
    pub badge: BadgeView,
    pub confidence: String,
    /// Both identifier cells; the second is empty for single-identifier
    /// missions so columns stay aligned.
    pub identifiers: [String; 2],
    pub row_id: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderView {
    pub label: &'static str,
    pub column: Option<SortColumn>,
    pub sorted: Option<SortDirection>,
    pub visible: bool,
}

/// Everything the UI needs to draw the results section.
#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    pub mission: Mission,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub count_label: String,
    pub visible: bool,
}

/// Owns the current result set, its sort state, and results visibility.
#[derive(Clone, Debug, Default)]
pub struct ResultTable {
    mission: Mission,
    records: Vec<PredictionRecord>,
    sort: SortState,
    visible: bool,
}

impl ResultTable {
    pub fn new(mission: Mission) -> Self {
        Self {
            mission,
            ..Self::default()
        }
    }

    /// Replace every record. Sort state is left untouched; the new rows stay
    /// in backend order until the next header click.
    pub fn set_results(&mut self, records: Vec<PredictionRecord>, mission: Mission) {
        tracing::debug!("Result table replaced with {} {mission} rows", records.len());
        self.records = records;
        self.mission = mission;
        self.visible = true;
    }

    /// Drop all rows and forget the sort, as on a mission switch.
    pub fn clear(&mut self, mission: Mission) {
        self.records.clear();
        self.sort = SortState::default();
        self.mission = mission;
        self.visible = false;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Drop the rows of a superseded batch. The sort column and direction
    /// carry over to the next batch.
    pub fn discard_records(&mut self) {
        self.records.clear();
        self.visible = false;
    }

    /// Apply a header click and reorder the rows.
    pub fn sort_by(&mut self, column: SortColumn) -> SortDirection {
        let direction = self.sort.click(column);
        sort::sort_records(&mut self.records, column, direction, self.mission);
        direction
    }

    /// Index-based variant of [`ResultTable::sort_by`]; out-of-range indices
    /// leave the table unchanged.
    pub fn sort_by_index(&mut self, index: usize) -> Option<SortDirection> {
        SortColumn::from_index(index).map(|column| self.sort_by(column))
    }

    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn mission(&self) -> Mission {
        self.mission
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn render(&self) -> TableView {
        TableView {
            mission: self.mission,
            headers: self.headers(),
            rows: self.records.iter().map(|r| render_row(r, self.mission)).collect(),
            count_label: format!("{} predictions", self.records.len()),
            visible: self.visible,
        }
    }

    fn headers(&self) -> Vec<HeaderView> {
        let [first_id, second_id] = self.mission.identifier_headers();
        let sortable = |label: &'static str, column: SortColumn, visible: bool| HeaderView {
            label,
            column: Some(column),
            sorted: self.sort.indicator(column),
            visible,
        };
        vec![
            sortable("Predicted Class", SortColumn::Class, true),
            sortable("Confidence", SortColumn::Confidence, true),
            sortable(first_id, SortColumn::PrimaryIdentifier, true),
            sortable(second_id, SortColumn::SecondaryIdentifier, !second_id.is_empty()),
            HeaderView {
                label: "Row ID",
                column: None,
                sorted: None,
                visible: true,
            },
        ]
    }
}

fn render_row(record: &PredictionRecord, mission: Mission) -> RowView {
    let class = record.predicted_class.as_deref().filter(|c| !c.is_empty());
    let badge = BadgeView {
        label: class.unwrap_or(PLACEHOLDER).to_string(),
        style: class.map(BadgeStyle::for_class).unwrap_or(BadgeStyle::Neutral),
    };
    let confidence = record
        .confidence
        .map(format_confidence)
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let primary = sort::primary_identifier(record, mission)
        .unwrap_or(PLACEHOLDER)
        .to_string();
    let secondary = if mission.identifier_columns().len() > 1 {
        sort::secondary_identifier(record, mission)
            .unwrap_or(PLACEHOLDER)
            .to_string()
    } else {
        String::new()
    };
    RowView {
        badge,
        confidence,
        identifiers: [primary, secondary],
        row_id: record
            .row_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    }
}
