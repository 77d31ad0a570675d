mod support;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use exofinder::config::{AppSettings, BackendSettings, UiSettings};
use exofinder::egui_app::controller::EguiController;
use exofinder::mission::Mission;
use exofinder::predictions::{SortColumn, SortDirection};
use support::exofinder_env::ExofinderEnvGuard;
use support::fake_backend::{CannedResponse, FakeBackend};
use tempfile::TempDir;

const POLL_TIMEOUT: Duration = Duration::from_secs(10);

struct ControllerHarness {
    _config: ExofinderEnvGuard,
    temp: TempDir,
    controller: EguiController,
}

impl ControllerHarness {
    fn new(base_url: &str, mission: Mission) -> Self {
        let temp = tempfile::tempdir().unwrap();
        let config = ExofinderEnvGuard::set_config_home(temp.path().join("config"));
        let controller = EguiController::new(AppSettings {
            backend: BackendSettings {
                base_url: base_url.to_string(),
                connect_timeout_secs: 2,
                read_timeout_secs: 5,
            },
            ui: UiSettings {
                default_mission: mission,
                chat_enabled: true,
            },
        });
        Self {
            _config: config,
            temp,
            controller,
        }
    }

    fn write_csv(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn wait_until_idle(&mut self) {
        let deadline = Instant::now() + POLL_TIMEOUT;
        loop {
            self.controller.poll_background_jobs();
            if !self.controller.is_busy() {
                return;
            }
            assert!(Instant::now() < deadline, "requests did not finish in time");
            thread::sleep(Duration::from_millis(10));
        }
    }
}

const KEPLER_RESPONSE: &str = r#"{"success":true,"mission":"kepler","total_rows":3,"results":[
    {"RowID":1,"Predicted_Class":"CANDIDATE","Confidence":0.61,"kepoi_name":"K00752.01","kepler_name":"Kepler-227 b"},
    {"RowID":2,"Predicted_Class":"FALSE POSITIVE","Confidence":0.97,"kepoi_name":"K00753.01"},
    {"RowID":3,"Predicted_Class":"CONFIRMED","Confidence":0.88,"kepoi_name":"K00754.01"}
]}"#;

#[test]
fn csv_prediction_fills_table() {
    let backend = FakeBackend::serve(vec![CannedResponse::json(200, KEPLER_RESPONSE)]);
    let mut harness = ControllerHarness::new(&backend.url, Mission::Kepler);
    let path = harness.write_csv("koi.csv", "kepoi_name,koi_period\nK00752.01,9.48\n");
    harness.controller.set_csv_path(&path);

    harness.controller.predict_csv();
    assert!(harness.controller.ui.upload.loading);
    assert!(harness.controller.is_busy());
    harness.wait_until_idle();

    let captured = backend.next_request();
    assert_eq!(captured.multipart_field("mission").as_deref(), Some("kepler"));
    assert!(!harness.controller.ui.upload.loading);
    assert_eq!(harness.controller.ui.upload.error, None);
    let table = harness.controller.session().table();
    assert!(table.is_visible());
    let view = table.render();
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.count_label, "3 predictions");
    assert_eq!(view.rows[0].identifiers, ["K00752.01", "Kepler-227 b"]);
    assert_eq!(view.rows[1].identifiers[1], "N/A");

    harness.controller.sort_results(SortColumn::Confidence);
    harness.controller.sort_results(SortColumn::Confidence);
    let table = harness.controller.session().table();
    assert_eq!(
        table.sort_state().indicator(SortColumn::Confidence),
        Some(SortDirection::Descending)
    );
    assert_eq!(table.render().rows[0].confidence, "97.0%");
}

#[test]
fn mission_switch_discards_in_flight_prediction() {
    let backend = FakeBackend::serve(vec![CannedResponse::json(200, KEPLER_RESPONSE)]);
    let mut harness = ControllerHarness::new(&backend.url, Mission::Kepler);
    let path = harness.write_csv("koi.csv", "kepoi_name\nK00752.01\n");
    harness.controller.set_csv_path(&path);

    harness.controller.predict_csv();
    harness.controller.select_mission(Mission::K2);
    harness.wait_until_idle();

    let session = harness.controller.session();
    assert_eq!(session.mission(), Mission::K2);
    assert!(session.table().is_empty());
    assert!(!session.table().is_visible());
    assert_eq!(session.table().mission(), Mission::K2);
    assert_eq!(harness.controller.ui.upload.error, None);
    assert!(!harness.controller.ui.upload.loading);
}

#[test]
fn new_mission_can_predict_while_old_request_is_outstanding() {
    let backend = FakeBackend::serve(vec![
        CannedResponse::json(200, KEPLER_RESPONSE),
        CannedResponse::json(
            200,
            r#"{"predictions":[{"Predicted_Class":"PC","Confidence":0.66,"toi":"101.01","RowID":1}]}"#,
        ),
    ]);
    let mut harness = ControllerHarness::new(&backend.url, Mission::Kepler);
    let path = harness.write_csv("mixed.csv", "toi,kepoi_name
101.01,K00752.01
");
    harness.controller.set_csv_path(&path);

    harness.controller.predict_csv();
    let first = backend.next_request();
    harness.controller.select_mission(Mission::Tess);
    assert!(!harness.controller.ui.upload.loading);

    harness.controller.predict_csv();
    assert!(harness.controller.ui.upload.loading);
    let second = backend.next_request();
    harness.wait_until_idle();

    assert_eq!(first.multipart_field("mission").as_deref(), Some("kepler"));
    assert_eq!(second.multipart_field("mission").as_deref(), Some("tess"));
    let view = harness.controller.session().table().render();
    assert_eq!(view.mission, Mission::Tess);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].identifiers[0], "101.01");
    assert!(!harness.controller.ui.upload.loading);
}

#[test]
fn rejected_upload_shows_backend_message() {
    let backend = FakeBackend::serve(vec![CannedResponse::json(
        400,
        r#"{"error":"Unsupported mission: kepler"}"#,
    )]);
    let mut harness = ControllerHarness::new(&backend.url, Mission::Kepler);
    let path = harness.write_csv("koi.csv", "kepoi_name\nK00752.01\n");
    harness.controller.set_csv_path(&path);

    harness.controller.predict_csv();
    harness.wait_until_idle();

    assert_eq!(
        harness.controller.ui.upload.error.as_deref(),
        Some("Unsupported mission: kepler")
    );
    assert_eq!(harness.controller.ui.status.text, "Unsupported mission: kepler");
    assert!(harness.controller.session().table().is_empty());
}

#[test]
fn manual_prediction_shows_result() {
    let backend = FakeBackend::serve(vec![CannedResponse::json(
        200,
        r#"{"prediction":"PC","confidence":0.72,"probabilities":{"PC":0.72,"FP":0.28}}"#,
    )]);
    let mut harness = ControllerHarness::new(&backend.url, Mission::Tess);
    *harness.controller.form_value_mut(0).unwrap() = "3.14".to_string();

    harness.controller.predict_manual();
    assert!(harness.controller.ui.manual.loading);
    harness.wait_until_idle();

    let body = backend.next_request().json();
    assert_eq!(body["pl_orbper"], "3.14");
    assert_eq!(body["mission"], "tess");
    let result = harness
        .controller
        .session()
        .manual_result()
        .expect("manual result present");
    assert_eq!(result.render().confidence, "72.0%");
    assert!(!harness.controller.ui.manual.loading);
}

#[test]
fn advanced_feature_selection_travels_with_manual_request() {
    let backend = FakeBackend::serve(vec![CannedResponse::json(
        200,
        r#"{"prediction":"CANDIDATE","confidence":0.5}"#,
    )]);
    let mut harness = ControllerHarness::new(&backend.url, Mission::Kepler);
    harness.controller.set_advanced_features_open(true);
    harness.controller.toggle_feature("koi_dor", false);
    harness.controller.toggle_feature("koi_depth", true);

    harness.controller.predict_manual();
    harness.wait_until_idle();

    let body = backend.next_request().json();
    let expected =
        serde_json::json!(["koi_period", "koi_prad", "koi_teq", "koi_insol", "koi_depth"]);
    assert_eq!(body["features"], expected);
    assert_eq!(body["selected_features"], expected);
}

#[test]
fn download_writes_results_file() {
    let csv = "RowID,Predicted_Class\n1,CANDIDATE\n";
    let backend = FakeBackend::serve(vec![
        CannedResponse::json(200, KEPLER_RESPONSE),
        CannedResponse::csv(csv),
    ]);
    let mut harness = ControllerHarness::new(&backend.url, Mission::Kepler);
    let path = harness.write_csv("koi.csv", "kepoi_name\nK00752.01\n");
    harness.controller.set_csv_path(&path);
    harness.controller.predict_csv();
    harness.wait_until_idle();

    let target = harness.temp.path().join("exoplanet_predictions.csv");
    harness.controller.download_results_to(target.clone());
    assert!(harness.controller.ui.download_in_progress);
    harness.wait_until_idle();

    backend.next_request();
    let export = backend.next_request();
    assert_eq!(export.path, "/download_results");
    assert_eq!(export.json()["results"].as_array().unwrap().len(), 3);
    assert_eq!(std::fs::read_to_string(&target).unwrap(), csv);
    assert!(!harness.controller.ui.download_in_progress);
    assert!(harness.controller.ui.status.text.starts_with("Saved results to"));
}

#[test]
fn chat_round_trip_appends_reply() {
    let backend = FakeBackend::serve(vec![
        CannedResponse::json(200, r#"{"status":"success","response":"Kepler stared at Cygnus."}"#),
        CannedResponse::json(500, r#"{"error":"Rate limit exceeded"}"#),
    ]);
    let mut harness = ControllerHarness::new(&backend.url, Mission::Kepler);

    harness.controller.ui.chat.input = "Where did Kepler look?".to_string();
    harness.controller.send_chat();
    assert!(harness.controller.chat().awaiting_reply());
    assert!(harness.controller.ui.chat.input.is_empty());
    harness.wait_until_idle();

    let last = harness.controller.chat().messages().last().unwrap();
    assert_eq!(last.text, "Kepler stared at Cygnus.");
    assert!(!last.is_error);

    harness.controller.ui.chat.input = "And then?".to_string();
    harness.controller.send_chat();
    harness.wait_until_idle();

    let last = harness.controller.chat().messages().last().unwrap();
    assert_eq!(last.text, "Rate limit exceeded");
    assert!(last.is_error);
    assert_eq!(harness.controller.chat().messages().len(), 5);
}

#[test]
fn configuration_loads_from_config_home() {
    let temp = tempfile::tempdir().unwrap();
    let _guard = ExofinderEnvGuard::set_config_home(temp.path().to_path_buf());
    let dir = temp.path().join(".exofinder");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "[backend]\nbase_url = \"http://10.0.0.5:8080\"\n\n[ui]\ndefault_mission = \"tess\"\n",
    )
    .unwrap();

    let controller = EguiController::load_configuration().unwrap();

    assert_eq!(controller.session().mission(), Mission::Tess);
    assert_eq!(controller.settings().backend.base_url, "http://10.0.0.5:8080");
    assert_eq!(controller.ui.settings.base_url_input, "http://10.0.0.5:8080");
}

#[test]
fn backend_url_env_overrides_config_file() {
    let temp = tempfile::tempdir().unwrap();
    let mut guard = ExofinderEnvGuard::set_config_home(temp.path().to_path_buf());
    guard.set_backend_url("http://override.test:9000");

    let controller = EguiController::load_configuration().unwrap();

    assert_eq!(
        controller.settings().backend.base_url,
        "http://override.test:9000"
    );
}
