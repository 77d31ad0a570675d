//! Prediction records returned by the backend and the result table that
//! sorts and projects them for display.

mod manual;
mod record;
pub mod sort;
mod table;

pub use manual::{ManualPrediction, ManualResultView, ProbabilityView, ResultTone};
pub use record::{PredictionRecord, RowId};
pub use sort::{SortColumn, SortDirection, SortState, sort_records};
pub use table::{
    BadgeStyle, BadgeView, HeaderView, PLACEHOLDER, ResultTable, RowView, TableView,
    format_confidence,
};
