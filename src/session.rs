//! Everything the user has chosen or received in this run, plus the request
//! bookkeeping that keeps late responses from landing in the wrong mission.

use crate::backend::{CsvPredictionRequest, CsvPredictions, ManualPredictionRequest};
use crate::form::{FeatureSelection, ManualForm};
use crate::mission::Mission;
use crate::predictions::{ManualPrediction, ResultTable};
use crate::upload::{CsvUpload, UploadError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    CsvPrediction,
    ManualPrediction,
    Download,
    Chat,
}

impl RequestKind {
    const COUNT: usize = 4;

    fn slot(self) -> usize {
        match self {
            RequestKind::CsvPrediction => 0,
            RequestKind::ManualPrediction => 1,
            RequestKind::Download => 2,
            RequestKind::Chat => 3,
        }
    }

    /// Predictions belong to the mission they were made for; downloads and
    /// chat do not.
    fn mission_scoped(self) -> bool {
        matches!(
            self,
            RequestKind::CsvPrediction | RequestKind::ManualPrediction
        )
    }
}

/// Issued when a request starts; checked again when its response arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub mission: Mission,
    generation: u64,
    mission_epoch: u64,
}

#[derive(Debug)]
pub struct Session {
    mission: Mission,
    table: ResultTable,
    features: FeatureSelection,
    form: ManualForm,
    manual_result: Option<ManualPrediction>,
    upload: Option<CsvUpload>,
    next_generation: u64,
    latest: [u64; RequestKind::COUNT],
    mission_epoch: u64,
}

impl Session {
    pub fn new(mission: Mission) -> Self {
        Self {
            mission,
            table: ResultTable::new(mission),
            features: FeatureSelection::new(),
            form: ManualForm::new(mission),
            manual_result: None,
            upload: None,
            next_generation: 0,
            latest: [0; RequestKind::COUNT],
            mission_epoch: 0,
        }
    }

    pub fn mission(&self) -> Mission {
        self.mission
    }

    /// Select a mission: regenerate the form, drop results and sort state, and
    /// make any in-flight prediction stale. Feature sets are per mission and
    /// survive.
    pub fn switch_mission(&mut self, mission: Mission) {
        tracing::info!("Switching mission from {} to {mission}", self.mission);
        self.mission = mission;
        self.form.rebuild(mission);
        self.table.clear(mission);
        self.manual_result = None;
        self.mission_epoch += 1;
    }

    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ResultTable {
        &mut self.table
    }

    pub fn features(&self) -> &FeatureSelection {
        &self.features
    }

    pub fn features_mut(&mut self) -> &mut FeatureSelection {
        &mut self.features
    }

    pub fn form(&self) -> &ManualForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ManualForm {
        &mut self.form
    }

    pub fn manual_result(&self) -> Option<&ManualPrediction> {
        self.manual_result.as_ref()
    }

    pub fn upload(&self) -> Option<&CsvUpload> {
        self.upload.as_ref()
    }

    pub fn set_upload(&mut self, upload: CsvUpload) {
        tracing::info!("Selected {} ({})", upload.file_name, upload.size_label());
        self.upload = Some(upload);
        self.table.hide();
    }

    /// Forget the chosen file and hide the results it produced.
    pub fn remove_upload(&mut self) {
        self.upload = None;
        self.table.hide();
    }

    /// Start a request of `kind`. Any earlier request of the same kind is
    /// superseded. Starting a prediction drops the previous result of that
    /// kind; the table keeps its sort.
    pub fn begin_request(&mut self, kind: RequestKind) -> RequestTicket {
        self.next_generation += 1;
        self.latest[kind.slot()] = self.next_generation;
        match kind {
            RequestKind::CsvPrediction => self.table.discard_records(),
            RequestKind::ManualPrediction => self.manual_result = None,
            RequestKind::Download | RequestKind::Chat => {}
        }
        RequestTicket {
            kind,
            mission: self.mission,
            generation: self.next_generation,
            mission_epoch: self.mission_epoch,
        }
    }

    /// True if nothing has superseded `ticket` since it was issued.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        if self.latest[ticket.kind.slot()] != ticket.generation {
            return false;
        }
        !ticket.kind.mission_scoped() || ticket.mission_epoch == self.mission_epoch
    }

    fn accept(&self, ticket: &RequestTicket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            tracing::debug!(
                "Discarding stale {:?} response for {}",
                ticket.kind,
                ticket.mission
            );
        }
        current
    }

    /// Build the `/predict_csv` request from the chosen file and features.
    pub fn csv_request(&self) -> Result<CsvPredictionRequest, UploadError> {
        let upload = self.upload.clone().ok_or(UploadError::NoFile)?;
        Ok(CsvPredictionRequest {
            upload,
            mission: self.mission,
            features: self.features.payload(self.mission),
        })
    }

    pub fn manual_request(&self) -> ManualPredictionRequest {
        ManualPredictionRequest {
            values: self.form.values_map(),
            mission: self.mission,
            features: self.features.payload(self.mission),
        }
    }

    /// Show batch predictions if `ticket` is still current. Returns whether
    /// they were applied.
    pub fn apply_csv_predictions(
        &mut self,
        ticket: &RequestTicket,
        response: CsvPredictions,
    ) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        if let Some(reported) = response.mission.filter(|m| *m != ticket.mission) {
            tracing::warn!(
                "Backend reported mission {reported} for a {} request",
                ticket.mission
            );
        }
        self.table.set_results(response.records, ticket.mission);
        true
    }

    pub fn apply_manual_prediction(
        &mut self,
        ticket: &RequestTicket,
        prediction: ManualPrediction,
    ) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.manual_result = Some(prediction);
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mission::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictions::{PredictionRecord, SortColumn};

    fn predictions(classes: &[&str]) -> CsvPredictions {
        CsvPredictions {
            records: classes
                .iter()
                .map(|class| PredictionRecord::new(*class, 0.5))
                .collect(),
            mission: None,
            total_rows: None,
        }
    }

    #[test]
    fn switch_mission_clears_results_and_sort() {
        let mut session = Session::new(Mission::Kepler);
        let ticket = session.begin_request(RequestKind::CsvPrediction);
        assert!(session.apply_csv_predictions(&ticket, predictions(&["CONFIRMED", "CANDIDATE"])));
        session.table_mut().sort_by(SortColumn::Class);
        session.form_mut().set_value("koi_period", "3.5");

        session.switch_mission(Mission::K2);
        assert!(session.table().is_empty());
        assert_eq!(session.table().sort_state().column, None);
        assert_eq!(session.table().mission(), Mission::K2);
        assert_eq!(session.form().layout().mission(), Mission::K2);
    }

    #[test]
    fn response_after_mission_switch_is_discarded() {
        let mut session = Session::new(Mission::Kepler);
        let ticket = session.begin_request(RequestKind::CsvPrediction);
        session.switch_mission(Mission::Tess);
        assert!(!session.is_current(&ticket));
        assert!(!session.apply_csv_predictions(&ticket, predictions(&["CONFIRMED"])));
        assert!(session.table().is_empty());
    }

    #[test]
    fn newer_request_of_same_kind_supersedes_older() {
        let mut session = Session::new(Mission::Kepler);
        let first = session.begin_request(RequestKind::ManualPrediction);
        let chat = session.begin_request(RequestKind::Chat);
        let second = session.begin_request(RequestKind::ManualPrediction);
        assert!(!session.is_current(&first));
        assert!(session.is_current(&second));
        assert!(session.is_current(&chat));
    }

    #[test]
    fn new_csv_prediction_drops_old_rows_but_keeps_sort() {
        let mut session = Session::new(Mission::Kepler);
        let ticket = session.begin_request(RequestKind::CsvPrediction);
        session.apply_csv_predictions(&ticket, predictions(&["CONFIRMED", "CANDIDATE"]));
        session.table_mut().sort_by(SortColumn::Class);

        let next = session.begin_request(RequestKind::CsvPrediction);
        assert!(session.table().is_empty());
        assert!(!session.table().is_visible());
        assert_eq!(session.table().sort_state().column, Some(SortColumn::Class));
        assert!(session.apply_csv_predictions(&next, predictions(&["CANDIDATE"])));
        assert_eq!(session.table().len(), 1);
    }

    #[test]
    fn chat_survives_mission_switch() {
        let mut session = Session::new(Mission::Kepler);
        let chat = session.begin_request(RequestKind::Chat);
        session.switch_mission(Mission::K2);
        assert!(session.is_current(&chat));
    }

    #[test]
    fn csv_request_needs_a_file() {
        let mut session = Session::new(Mission::Tess);
        assert!(matches!(session.csv_request(), Err(UploadError::NoFile)));
        session.set_upload(CsvUpload::from_bytes("toi.csv", b"toi\n1\n".to_vec()).unwrap());
        let request = session.csv_request().unwrap();
        assert_eq!(request.mission, Mission::Tess);
        assert_eq!(request.features.selected_features, None);
    }

    #[test]
    fn removing_the_file_hides_results() {
        let mut session = Session::new(Mission::Kepler);
        session.set_upload(CsvUpload::from_bytes("koi.csv", b"a\n1\n".to_vec()).unwrap());
        let ticket = session.begin_request(RequestKind::CsvPrediction);
        session.apply_csv_predictions(&ticket, predictions(&["CONFIRMED"]));
        assert!(session.table().is_visible());
        session.remove_upload();
        assert!(session.upload().is_none());
        assert!(!session.table().is_visible());
    }

    #[test]
    fn manual_request_uses_current_form_and_features() {
        let mut session = Session::new(Mission::Kepler);
        session.form_mut().set_value("koi_period", "9.48");
        session.features_mut().toggle_feature(Mission::Kepler, "koi_depth", true);
        let body = session.manual_request().to_json();
        assert_eq!(body["koi_period"], "9.48");
        assert_eq!(body["mission"], "kepler");
        assert_eq!(body["selected_features"].as_array().map(Vec::len), Some(6));
    }
}
