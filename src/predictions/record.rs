use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// One row of batch prediction output.
///
/// Field names follow the backend's wire format. Keys this client does not
/// know about are kept in `extra` so exported results round-trip untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(
        rename = "Predicted_Class",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub predicted_class: Option<String>,
    #[serde(
        rename = "Confidence",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub kepoi_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub kepler_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub pl_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub toi: Option<String>,
    #[serde(
        rename = "RowID",
        alias = "row_id",
        alias = "Row_ID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub row_id: Option<RowId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictionRecord {
    pub fn new(predicted_class: impl Into<String>, confidence: f64) -> Self {
        Self {
            predicted_class: Some(predicted_class.into()),
            confidence: Some(confidence),
            ..Self::default()
        }
    }

    pub fn with_row_id(mut self, row_id: impl Into<RowId>) -> Self {
        self.row_id = Some(row_id.into());
        self
    }

    /// Look up an identifier column by its wire name.
    pub fn identifier(&self, column: &str) -> Option<&str> {
        let value = match column {
            "kepoi_name" => self.kepoi_name.as_deref(),
            "kepler_name" => self.kepler_name.as_deref(),
            "pl_name" => self.pl_name.as_deref(),
            "toi" => self.toi.as_deref(),
            _ => None,
        };
        value.filter(|text| !text.is_empty())
    }
}

/// Row identifier; the backend numbers rows but older exports used labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(Number),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(number) => write!(f, "{number}"),
            RowId::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for RowId {
    fn from(value: u64) -> Self {
        RowId::Number(Number::from(value))
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId::Text(value.to_string())
    }
}

/// Accept strings and numbers; `null` and other shapes become `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

/// Accept numbers and numeric strings; anything unparseable becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite()))
}
