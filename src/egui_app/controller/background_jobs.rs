use super::jobs::{
    ChatResult, CsvPredictionResult, DownloadResult, JobMessage, ManualPredictionResult,
};
use super::*;

impl EguiController {
    /// Drain finished requests. Called once per frame.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::CsvPredicted(message) => self.finish_csv_prediction(message),
                JobMessage::ManualPredicted(message) => self.finish_manual_prediction(message),
                JobMessage::ResultsDownloaded(message) => self.finish_download(message),
                JobMessage::ChatReplied(message) => self.finish_chat(message),
            }
        }
    }

    fn finish_csv_prediction(&mut self, message: CsvPredictionResult) {
        if self.jobs.finish_csv_prediction(&message.ticket) {
            self.ui.upload.loading = false;
        }
        if !self.session.is_current(&message.ticket) {
            tracing::debug!("Ignoring batch prediction for superseded request");
            return;
        }
        match message.result {
            Ok(predictions) => {
                let count = predictions.records.len();
                let mission = message.ticket.mission;
                if self.session.apply_csv_predictions(&message.ticket, predictions) {
                    self.set_status(
                        format!("{count} predictions from the {mission} model"),
                        StatusTone::Info,
                    );
                }
            }
            Err(err) => {
                let text = err.user_message(Endpoint::PredictCsv);
                tracing::warn!("Batch prediction failed: {err}");
                self.ui.upload.error = Some(text.clone());
                self.set_status(text, StatusTone::Error);
            }
        }
    }

    fn finish_manual_prediction(&mut self, message: ManualPredictionResult) {
        if self.jobs.finish_manual_prediction(&message.ticket) {
            self.ui.manual.loading = false;
        }
        if !self.session.is_current(&message.ticket) {
            tracing::debug!("Ignoring manual prediction for superseded request");
            return;
        }
        match message.result {
            Ok(prediction) => {
                let summary = format!("Manual entry classified as {}", prediction.prediction);
                if self
                    .session
                    .apply_manual_prediction(&message.ticket, prediction)
                {
                    self.set_status(summary, StatusTone::Info);
                }
            }
            Err(err) => {
                let text = err.user_message(Endpoint::PredictManual);
                tracing::warn!("Manual prediction failed: {err}");
                self.ui.manual.error = Some(text.clone());
                self.set_status(text, StatusTone::Error);
            }
        }
    }

    fn finish_download(&mut self, message: DownloadResult) {
        if self.jobs.finish_download(&message.ticket) {
            self.ui.download_in_progress = false;
        }
        if !self.session.is_current(&message.ticket) {
            tracing::debug!("Download finished after a newer export started");
        }
        match message.result {
            Ok(bytes) => self.set_status(
                format!(
                    "Saved results to {} ({bytes} bytes)",
                    message.path.display()
                ),
                StatusTone::Info,
            ),
            Err(err) => {
                tracing::warn!("Download failed: {err}");
                self.report_error(&err, Endpoint::DownloadResults);
            }
        }
    }

    fn finish_chat(&mut self, message: ChatResult) {
        self.jobs.finish_chat(&message.ticket);
        if !self.session.is_current(&message.ticket) {
            tracing::debug!("Chat reply arrived after a newer message was sent");
        }
        self.chat.receive(message.result);
        self.ui.chat.focus_input_requested = true;
    }
}
