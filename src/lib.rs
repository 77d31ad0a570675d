//! Library exports for reuse in benchmarks and tests.
/// Config directory resolution.
pub mod app_dirs;
/// Inference service client.
pub mod backend;
/// Assistant conversation state.
pub mod chat;
/// Persisted settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Manual-entry form and feature selection.
pub mod form;
mod http_client;
/// Tracing setup and log file rotation.
pub mod logging;
/// Mission catalog and field schemas.
pub mod mission;
/// Prediction records and the result table.
pub mod predictions;
/// Bundled example CSV files.
pub mod sample_data;
/// Per-run state and request tickets.
pub mod session;
/// CSV upload validation.
pub mod upload;
