//! Blocking client for the ExoFinder inference service.

mod api;
mod multipart;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

pub use api::{CsvPredictionRequest, CsvPredictions, Endpoint, ManualPredictionRequest};

use crate::config::BackendSettings;
use crate::http_client;
use crate::predictions::{ManualPrediction, PredictionRecord};
use api::{
    ChatRequest, DownloadRequest, MAX_DOWNLOAD_BYTES, MAX_PREDICTIONS_BYTES,
    MAX_SMALL_RESPONSE_BYTES,
};
use multipart::MultipartForm;

/// Longest error body kept verbatim in a status error.
const MAX_STATUS_BODY_CHARS: usize = 300;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with an `{error}` message.
    #[error("{0}")]
    Rejected(String),
    #[error("No results to download")]
    NoResults,
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("{0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Invalid backend URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Failed to read response: {0}")]
    Read(std::io::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl BackendError {
    /// Text shown to the user. Backend messages and client-side checks are
    /// shown as-is; everything else gets the endpoint's failure prefix.
    pub fn user_message(&self, endpoint: Endpoint) -> String {
        match self {
            BackendError::Rejected(_) | BackendError::NoResults => self.to_string(),
            other => format!("{}{other}", endpoint.failure_prefix()),
        }
    }
}

/// Talks to one backend instance. Cheap to clone; clones share the agent.
#[derive(Clone, Debug)]
pub struct BackendClient {
    base_url: Url,
    agent: ureq::Agent,
}

impl BackendClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, BackendError> {
        Ok(Self {
            base_url: parse_base_url(&settings.base_url)?,
            agent: http_client::agent(settings),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, BackendError> {
        self.base_url
            .join(endpoint.path())
            .map_err(|source| BackendError::InvalidUrl {
                url: format!("{}{}", self.base_url, endpoint.path()),
                source,
            })
    }

    /// Upload a CSV for batch classification.
    pub fn predict_csv(
        &self,
        request: &CsvPredictionRequest,
    ) -> Result<CsvPredictions, BackendError> {
        let mut form = MultipartForm::new()
            .file(
                "file",
                &request.upload.file_name,
                "text/csv",
                &request.upload.bytes,
            )
            .text("mission", request.mission.id())
            .text("features", &json_array(&request.features.features));
        if let Some(selected) = &request.features.selected_features {
            form = form.text("selected_features", &json_array(selected));
        }
        let (content_type, body) = form.finish();
        tracing::info!(
            "Submitting {} ({} bytes) for {} predictions",
            request.upload.file_name,
            request.upload.bytes.len(),
            request.mission
        );
        let url = self.endpoint_url(Endpoint::PredictCsv)?;
        let response = into_response(
            self.agent
                .post(url.as_str())
                .set("Accept", "application/json")
                .set("Content-Type", &content_type)
                .send_bytes(&body),
        )?;
        let bytes = http_client::read_response_bytes(response, MAX_PREDICTIONS_BYTES)
            .map_err(BackendError::Read)?;
        let parsed = api::parse_csv_predictions(&bytes)?;
        tracing::info!("Received {} predictions", parsed.records.len());
        Ok(parsed)
    }

    pub fn predict_manual(
        &self,
        request: &ManualPredictionRequest,
    ) -> Result<ManualPrediction, BackendError> {
        tracing::info!("Requesting manual {} prediction", request.mission);
        let bytes = self.post_json(
            Endpoint::PredictManual,
            &request.to_json(),
            MAX_SMALL_RESPONSE_BYTES,
        )?;
        api::parse_manual_prediction(&bytes)
    }

    /// Ask the backend to render `records` as CSV and stream it to `path`.
    /// Returns the number of bytes written. Nothing is written when the
    /// backend refuses.
    pub fn download_results(
        &self,
        records: &[PredictionRecord],
        path: &Path,
    ) -> Result<u64, BackendError> {
        if records.is_empty() {
            return Err(BackendError::NoResults);
        }
        let url = self.endpoint_url(Endpoint::DownloadResults)?;
        let response = into_response(
            self.agent
                .post(url.as_str())
                .set("Accept", "text/csv")
                .send_json(DownloadRequest { results: records }),
        )?;
        let write_err = |source| BackendError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        match http_client::copy_response_to_writer(response, &mut writer, MAX_DOWNLOAD_BYTES) {
            Ok(written) => {
                tracing::info!("Saved {written} bytes of results to {}", path.display());
                Ok(written)
            }
            Err(err) => {
                drop(writer);
                let _ = std::fs::remove_file(path);
                Err(BackendError::Read(err))
            }
        }
    }

    /// Send one chat message and return the assistant's reply text.
    pub fn chat(&self, message: &str) -> Result<String, BackendError> {
        let bytes = self.post_json(
            Endpoint::Chat,
            &ChatRequest { message },
            MAX_SMALL_RESPONSE_BYTES,
        )?;
        api::parse_chat_reply(&bytes)
    }

    fn post_json(
        &self,
        endpoint: Endpoint,
        body: &impl Serialize,
        max_bytes: usize,
    ) -> Result<Vec<u8>, BackendError> {
        let url = self.endpoint_url(endpoint)?;
        let response = into_response(
            self.agent
                .post(url.as_str())
                .set("Accept", "application/json")
                .send_json(body),
        )?;
        http_client::read_response_bytes(response, max_bytes).map_err(BackendError::Read)
    }
}

/// Parse the configured base URL, treating it as a directory so relative
/// endpoint paths append instead of replacing the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|source| BackendError::InvalidUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn into_response(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<ureq::Response, BackendError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(code, response)) => Err(map_status_error(code, response)),
        Err(ureq::Error::Transport(err)) => {
            tracing::warn!("Backend unreachable: {err}");
            Err(BackendError::Transport(err.to_string()))
        }
    }
}

/// A JSON `{error}` body wins over the status code.
fn map_status_error(code: u16, response: ureq::Response) -> BackendError {
    let body = match http_client::read_response_bytes(response, MAX_SMALL_RESPONSE_BYTES) {
        Ok(bytes) => bytes,
        Err(err) => return BackendError::Status { code, body: err.to_string() },
    };
    if let Some(message) = serde_json::from_slice::<Value>(&body)
        .ok()
        .as_ref()
        .and_then(api::error_message)
    {
        tracing::warn!("Backend rejected request with HTTP {code}: {message}");
        return BackendError::Rejected(message);
    }
    let text = String::from_utf8_lossy(&body);
    let body: String = text.trim().chars().take(MAX_STATUS_BODY_CHARS).collect();
    tracing::warn!("Backend returned HTTP {code}");
    BackendError::Status { code, body }
}

fn json_array(items: &[String]) -> String {
    Value::Array(items.iter().cloned().map(Value::String).collect()).to_string()
}
