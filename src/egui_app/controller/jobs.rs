use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::backend::{
    BackendClient, BackendError, CsvPredictionRequest, CsvPredictions, ManualPredictionRequest,
};
use crate::predictions::{ManualPrediction, PredictionRecord};
use crate::session::RequestTicket;

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    CsvPredicted(CsvPredictionResult),
    ManualPredicted(ManualPredictionResult),
    ResultsDownloaded(DownloadResult),
    ChatReplied(ChatResult),
}

#[derive(Debug)]
pub(crate) struct CsvPredictionResult {
    pub(crate) ticket: RequestTicket,
    pub(crate) result: Result<CsvPredictions, BackendError>,
}

#[derive(Debug)]
pub(crate) struct ManualPredictionResult {
    pub(crate) ticket: RequestTicket,
    pub(crate) result: Result<ManualPrediction, BackendError>,
}

#[derive(Debug)]
pub(crate) struct DownloadJob {
    pub(crate) records: Vec<PredictionRecord>,
    pub(crate) path: PathBuf,
}

#[derive(Debug)]
pub(crate) struct DownloadResult {
    pub(crate) ticket: RequestTicket,
    pub(crate) path: PathBuf,
    pub(crate) result: Result<u64, BackendError>,
}

#[derive(Debug)]
pub(crate) struct ChatResult {
    pub(crate) ticket: RequestTicket,
    pub(crate) result: Result<String, BackendError>,
}

/// One background thread per request; results come back over `message_rx`.
/// Each slot holds the ticket of the outstanding request of that kind. It is
/// filled on the UI thread before spawning, so a second click can never start
/// a duplicate request, and only the matching result empties it again.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    csv: Option<RequestTicket>,
    manual: Option<RequestTicket>,
    download: Option<RequestTicket>,
    chat: Option<RequestTicket>,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            csv: None,
            manual: None,
            download: None,
            chat: None,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn any_in_progress(&self) -> bool {
        self.csv.is_some()
            || self.manual.is_some()
            || self.download.is_some()
            || self.chat.is_some()
    }

    pub(super) fn csv_in_progress(&self) -> bool {
        self.csv.is_some()
    }

    pub(super) fn manual_in_progress(&self) -> bool {
        self.manual.is_some()
    }

    pub(super) fn download_in_progress(&self) -> bool {
        self.download.is_some()
    }

    pub(super) fn chat_in_progress(&self) -> bool {
        self.chat.is_some()
    }

    /// Stop waiting on predictions made for the previous mission. Their
    /// threads still finish, but their results no longer hold a slot.
    pub(super) fn release_mission_scoped(&mut self) {
        if let Some(ticket) = self.csv.take() {
            tracing::debug!("Released batch prediction for {}", ticket.mission);
        }
        if let Some(ticket) = self.manual.take() {
            tracing::debug!("Released manual prediction for {}", ticket.mission);
        }
    }

    pub(super) fn begin_csv_prediction(
        &mut self,
        client: BackendClient,
        ticket: RequestTicket,
        request: CsvPredictionRequest,
    ) {
        if self.csv.is_some() {
            return;
        }
        self.csv = Some(ticket);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.predict_csv(&request);
            let _ = tx.send(JobMessage::CsvPredicted(CsvPredictionResult { ticket, result }));
        });
    }

    /// Returns true when `ticket` was the outstanding batch prediction.
    pub(super) fn finish_csv_prediction(&mut self, ticket: &RequestTicket) -> bool {
        finish_slot(&mut self.csv, ticket)
    }

    pub(super) fn begin_manual_prediction(
        &mut self,
        client: BackendClient,
        ticket: RequestTicket,
        request: ManualPredictionRequest,
    ) {
        if self.manual.is_some() {
            return;
        }
        self.manual = Some(ticket);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.predict_manual(&request);
            let _ = tx.send(JobMessage::ManualPredicted(ManualPredictionResult {
                ticket,
                result,
            }));
        });
    }

    pub(super) fn finish_manual_prediction(&mut self, ticket: &RequestTicket) -> bool {
        finish_slot(&mut self.manual, ticket)
    }

    pub(super) fn begin_download(
        &mut self,
        client: BackendClient,
        ticket: RequestTicket,
        job: DownloadJob,
    ) {
        if self.download.is_some() {
            return;
        }
        self.download = Some(ticket);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.download_results(&job.records, &job.path);
            let _ = tx.send(JobMessage::ResultsDownloaded(DownloadResult {
                ticket,
                path: job.path,
                result,
            }));
        });
    }

    pub(super) fn finish_download(&mut self, ticket: &RequestTicket) -> bool {
        finish_slot(&mut self.download, ticket)
    }

    pub(super) fn begin_chat(
        &mut self,
        client: BackendClient,
        ticket: RequestTicket,
        message: String,
    ) {
        if self.chat.is_some() {
            return;
        }
        self.chat = Some(ticket);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.chat(&message);
            let _ = tx.send(JobMessage::ChatReplied(ChatResult { ticket, result }));
        });
    }

    pub(super) fn finish_chat(&mut self, ticket: &RequestTicket) -> bool {
        finish_slot(&mut self.chat, ticket)
    }
}

fn finish_slot(slot: &mut Option<RequestTicket>, ticket: &RequestTicket) -> bool {
    if slot.as_ref() == Some(ticket) {
        *slot = None;
        true
    } else {
        false
    }
}
