use serde_json::{Map, Value};
use thiserror::Error;

use crate::mission::{FieldDescriptor, InputKind, Mission};

/// A filled-in manual value that does not fit its field.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{label} must be a number")]
    NotANumber { label: &'static str },
}

/// Manual-entry fields for one mission, split into two display columns.
#[derive(Clone, Debug, PartialEq)]
pub struct FormLayout {
    mission: Mission,
    /// Set when the requested mission id was not recognized and the Kepler
    /// schema was substituted.
    unrecognized: Option<String>,
}

/// Build the manual-entry form for a mission identifier.
///
/// Unknown identifiers fall back to the Kepler schema so the form is never
/// empty; the substitution is logged and recorded on the layout.
pub fn build_form(mission_id: &str) -> FormLayout {
    match Mission::from_id(mission_id) {
        Some(mission) => FormLayout::for_mission(mission),
        None => {
            tracing::warn!("Unknown mission '{mission_id}'; showing the Kepler form instead");
            FormLayout {
                mission: Mission::Kepler,
                unrecognized: Some(mission_id.to_string()),
            }
        }
    }
}

impl FormLayout {
    pub fn for_mission(mission: Mission) -> Self {
        Self {
            mission,
            unrecognized: None,
        }
    }

    pub fn mission(&self) -> Mission {
        self.mission
    }

    /// The mission id that could not be resolved, if the layout fell back.
    pub fn unrecognized_mission(&self) -> Option<&str> {
        self.unrecognized.as_deref()
    }

    /// All fields in declared order.
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.mission.field_schema()
    }

    /// Index where the second column starts: the first `ceil(n/2)` fields go
    /// left, the remainder right.
    pub fn split_index(&self) -> usize {
        self.fields().len().div_ceil(2)
    }

    pub fn columns(&self) -> [&'static [FieldDescriptor]; 2] {
        let (left, right) = self.fields().split_at(self.split_index());
        [left, right]
    }
}

/// Current values of the generated manual-entry inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct ManualForm {
    layout: FormLayout,
    values: Vec<String>,
}

impl ManualForm {
    pub fn new(mission: Mission) -> Self {
        Self::from_layout(FormLayout::for_mission(mission))
    }

    pub fn from_layout(layout: FormLayout) -> Self {
        let values = vec![String::new(); layout.fields().len()];
        Self { layout, values }
    }

    /// Throw away every field and value and regenerate for `mission`.
    pub fn rebuild(&mut self, mission: Mission) {
        *self = Self::new(mission);
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Mutable access for text-edit widgets.
    pub fn value_mut(&mut self, index: usize) -> Option<&mut String> {
        self.values.get_mut(index)
    }

    /// Set a value by field name; returns false for names not in the form.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Some(index) = self.layout.fields().iter().position(|f| f.name == name) else {
            return false;
        };
        self.values[index] = value.into();
        true
    }

    pub fn clear_values(&mut self) {
        self.values.iter_mut().for_each(String::clear);
    }

    /// Field name to trimmed string value, in declared order. Blank inputs are
    /// sent as empty strings so the backend can report which one is missing.
    /// First filled-in value that does not match its field's input kind.
    pub fn validate(&self) -> Result<(), FormError> {
        let fields = self.layout.fields();
        match fields
            .iter()
            .zip(&self.values)
            .find(|(field, value)| !field.accepts(value))
        {
            Some((field, _)) => match field.input_kind {
                InputKind::Number => Err(FormError::NotANumber { label: field.label }),
            },
            None => Ok(()),
        }
    }

    pub fn values_map(&self) -> Map<String, Value> {
        self.layout
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(field, value)| {
                (field.name.to_string(), Value::String(value.trim().to_string()))
            })
            .collect()
    }
}
