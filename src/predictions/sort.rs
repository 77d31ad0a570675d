//! Column sort policy for the result table.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use super::PredictionRecord;
use crate::mission::Mission;

/// Sortable result-table columns, indexed left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Class,
    Confidence,
    PrimaryIdentifier,
    SecondaryIdentifier,
}

impl SortColumn {
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Class,
        SortColumn::Confidence,
        SortColumn::PrimaryIdentifier,
        SortColumn::SecondaryIdentifier,
    ];

    /// Map a header index to a column; indices past the identifier columns
    /// are not sortable.
    pub fn from_index(index: usize) -> Option<SortColumn> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            SortColumn::Class => 0,
            SortColumn::Confidence => 1,
            SortColumn::PrimaryIdentifier => 2,
            SortColumn::SecondaryIdentifier => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Which column is sorted and in which direction. `column == None` means
/// rows are in backend order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl SortState {
    /// Apply a header click: the sorted column flips, any other column
    /// starts ascending.
    pub fn click(&mut self, column: SortColumn) -> SortDirection {
        if self.column == Some(column) {
            self.direction = self.direction.toggled();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
        self.direction
    }

    /// Direction shown on `column`'s header, if it is the sorted one.
    pub fn indicator(&self, column: SortColumn) -> Option<SortDirection> {
        (self.column == Some(column)).then_some(self.direction)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(String),
    Number(OrderedFloat<f64>),
}

fn sort_key(record: &PredictionRecord, column: SortColumn, mission: Mission) -> SortKey {
    match column {
        SortColumn::Class => text_key(record.predicted_class.as_deref()),
        SortColumn::Confidence => {
            SortKey::Number(OrderedFloat(record.confidence.unwrap_or(0.0)))
        }
        SortColumn::PrimaryIdentifier => text_key(primary_identifier(record, mission)),
        SortColumn::SecondaryIdentifier => text_key(secondary_identifier(record, mission)),
    }
}

/// Identifier shown in the first identifier column for `mission`.
pub(crate) fn primary_identifier(record: &PredictionRecord, mission: Mission) -> Option<&str> {
    let shown = identifier_at(record, mission, 0);
    match mission {
        // Sorts by the displayed TOI column; rows without a TOI show pl_name there.
        Mission::Tess => shown.or_else(|| record.identifier("pl_name")),
        Mission::Kepler | Mission::K2 => shown,
    }
}

/// Identifier for the second column; `None` for single-identifier missions.
pub(crate) fn secondary_identifier(record: &PredictionRecord, mission: Mission) -> Option<&str> {
    identifier_at(record, mission, 1)
}

fn identifier_at(record: &PredictionRecord, mission: Mission, position: usize) -> Option<&str> {
    let column = mission.identifier_columns().get(position)?;
    record.identifier(column)
}

fn text_key(value: Option<&str>) -> SortKey {
    SortKey::Text(value.unwrap_or_default().to_lowercase())
}

/// Stable sort: records with equal keys keep their current relative order
/// in both directions.
pub fn sort_records(
    records: &mut [PredictionRecord],
    column: SortColumn,
    direction: SortDirection,
    mission: Mission,
) {
    match direction {
        SortDirection::Ascending => {
            records.sort_by_cached_key(|record| sort_key(record, column, mission))
        }
        SortDirection::Descending => {
            records.sort_by_cached_key(|record| Reverse(sort_key(record, column, mission)))
        }
    }
}
