//! Request payloads and response parsing for the inference service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::BackendError;
use crate::form::FeaturePayload;
use crate::mission::Mission;
use crate::predictions::{ManualPrediction, PredictionRecord};
use crate::upload::CsvUpload;

pub(crate) const MAX_PREDICTIONS_BYTES: usize = 32 * 1024 * 1024;
pub(crate) const MAX_SMALL_RESPONSE_BYTES: usize = 1024 * 1024;
pub(crate) const MAX_DOWNLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Backend routes this client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    PredictCsv,
    PredictManual,
    DownloadResults,
    Chat,
}

impl Endpoint {
    /// Path relative to the configured base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::PredictCsv => "predict_csv",
            Endpoint::PredictManual => "predict_manual",
            Endpoint::DownloadResults => "download_results",
            Endpoint::Chat => "api/chat",
        }
    }

    /// Prefix put in front of transport and protocol failures.
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Endpoint::PredictCsv => "Error uploading file: ",
            Endpoint::PredictManual => "Error making prediction: ",
            Endpoint::DownloadResults => "Error downloading results: ",
            Endpoint::Chat => "Chat request failed: ",
        }
    }
}

/// Batch prediction request for an uploaded CSV.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvPredictionRequest {
    pub upload: CsvUpload,
    pub mission: Mission,
    pub features: FeaturePayload,
}

/// Single prediction from manually entered values.
#[derive(Clone, Debug, PartialEq)]
pub struct ManualPredictionRequest {
    /// Field name to entered value, in form order.
    pub values: Map<String, Value>,
    pub mission: Mission,
    pub features: FeaturePayload,
}

impl ManualPredictionRequest {
    /// Flat JSON object: every form value plus the mission and feature lists.
    pub fn to_json(&self) -> Value {
        let mut body = self.values.clone();
        body.insert("mission".into(), Value::String(self.mission.id().into()));
        body.insert("features".into(), string_array(&self.features.features));
        if let Some(selected) = &self.features.selected_features {
            body.insert("selected_features".into(), string_array(selected));
        }
        Value::Object(body)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DownloadRequest<'a> {
    pub results: &'a [PredictionRecord],
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Parsed `/predict_csv` success body.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvPredictions {
    pub records: Vec<PredictionRecord>,
    /// Mission the backend says it used, when it says so.
    pub mission: Option<Mission>,
    pub total_rows: Option<u64>,
}

#[derive(Deserialize)]
struct CsvPredictionsWire {
    #[serde(default)]
    predictions: Option<Vec<PredictionRecord>>,
    #[serde(default)]
    results: Option<Vec<PredictionRecord>>,
    #[serde(default)]
    mission: Option<String>,
    #[serde(default)]
    total_rows: Option<u64>,
}

pub(crate) fn parse_csv_predictions(body: &[u8]) -> Result<CsvPredictions, BackendError> {
    let value = parse_body(body)?;
    let wire: CsvPredictionsWire = serde_json::from_value(value)
        .map_err(|err| BackendError::InvalidResponse(err.to_string()))?;
    let records = wire.predictions.or(wire.results).ok_or_else(|| {
        BackendError::InvalidResponse("response contained no predictions".into())
    })?;
    Ok(CsvPredictions {
        records,
        mission: wire.mission.as_deref().and_then(Mission::from_id),
        total_rows: wire.total_rows,
    })
}

pub(crate) fn parse_manual_prediction(body: &[u8]) -> Result<ManualPrediction, BackendError> {
    let value = parse_body(body)?;
    serde_json::from_value(value).map_err(|err| BackendError::InvalidResponse(err.to_string()))
}

pub(crate) fn parse_chat_reply(body: &[u8]) -> Result<String, BackendError> {
    let value = parse_body(body)?;
    let success = value.get("status").and_then(Value::as_str) == Some("success");
    match value.get("response").and_then(Value::as_str) {
        Some(text) if success => Ok(text.to_string()),
        _ => Err(BackendError::InvalidResponse(
            "chat reply was not successful".into(),
        )),
    }
}

/// Decode a JSON body, turning a non-empty `error` field into a rejection.
fn parse_body(body: &[u8]) -> Result<Value, BackendError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| BackendError::InvalidResponse(err.to_string()))?;
    match error_message(&value) {
        Some(message) => Err(BackendError::Rejected(message)),
        None => Ok(value),
    }
}

/// The backend's `{error: "..."}` message, if the body carries one.
pub(crate) fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Null | Value::Bool(false) | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_predictions_or_results_key() {
        let parsed = parse_csv_predictions(
            br#"{"predictions":[{"Predicted_Class":"CANDIDATE","Confidence":0.91}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.mission, None);

        let parsed = parse_csv_predictions(
            br#"{"success":true,"results":[{"RowID":1,"Predicted_Class":"CONFIRMED","Confidence":0.8,"pl_name":"K2-18 b"}],"total_rows":1,"mission":"k2"}"#,
        )
        .unwrap();
        assert_eq!(parsed.mission, Some(Mission::K2));
        assert_eq!(parsed.total_rows, Some(1));
        assert_eq!(parsed.records[0].pl_name.as_deref(), Some("K2-18 b"));
    }

    #[test]
    fn error_field_is_surfaced_verbatim() {
        let err = parse_csv_predictions(br#"{"error":"CSV file is empty"}"#).unwrap_err();
        assert!(matches!(err, BackendError::Rejected(ref msg) if msg == "CSV file is empty"));
    }

    #[test]
    fn empty_error_field_is_ignored() {
        let parsed = parse_csv_predictions(br#"{"error":"","results":[]}"#).unwrap();
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn missing_record_list_is_invalid() {
        let err = parse_csv_predictions(br#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, BackendError::InvalidResponse(_)));
    }

    #[test]
    fn manual_prediction_keeps_probability_order() {
        let parsed = parse_manual_prediction(
            br#"{"prediction":"Planet Candidate","confidence":0.6,"probabilities":{"Planet Candidate":0.6,"False Positive":0.3,"Known Planet":0.1}}"#,
        )
        .unwrap();
        let keys: Vec<_> = parsed.probabilities.unwrap().keys().cloned().collect();
        assert_eq!(keys, ["Planet Candidate", "False Positive", "Known Planet"]);
    }

    #[test]
    fn chat_reply_requires_success_status() {
        assert_eq!(
            parse_chat_reply(br#"{"status":"success","response":"Hi"}"#).unwrap(),
            "Hi"
        );
        assert!(matches!(
            parse_chat_reply(br#"{"status":"error","error":"Message is required"}"#),
            Err(BackendError::Rejected(_))
        ));
        assert!(matches!(
            parse_chat_reply(br#"{"response":"Hi"}"#),
            Err(BackendError::InvalidResponse(_))
        ));
    }

    #[test]
    fn manual_body_is_flat_and_adds_selected_features_only_when_set() {
        let mut values = Map::new();
        values.insert("pl_orbper".into(), json!("3.2"));
        let mut request = ManualPredictionRequest {
            values,
            mission: Mission::Tess,
            features: FeaturePayload {
                features: vec!["Tmag".into()],
                selected_features: None,
            },
        };
        assert_eq!(
            request.to_json(),
            json!({"pl_orbper": "3.2", "mission": "tess", "features": ["Tmag"]})
        );
        request.features.selected_features = Some(vec!["Tmag".into()]);
        assert_eq!(request.to_json()["selected_features"], json!(["Tmag"]));
    }
}
