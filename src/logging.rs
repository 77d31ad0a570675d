//! Tracing setup: console output plus one log file per launch in the
//! `.exofinder/logs` directory, with only the newest launches kept.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};

/// Launches whose log files survive pruning.
pub const KEPT_LAUNCHES: usize = 10;

const DEFAULT_FILTER: &str = "info";
const FILE_NAME: &[BorrowedFormatItem<'static>] =
    format_description!("exofinder_[year]-[month]-[day]_[hour]-[minute]-[second].log");
const LINE_TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static FILE_WRITER: OnceLock<WorkerGuard> = OnceLock::new();

/// Reasons file logging could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(transparent)]
    Dirs(#[from] AppDirError),
    #[error("Failed to name log file: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("Failed to create log file at {path}: {source}")]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to prune old logs in {path}: {source}")]
    Prune {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to install global tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber. Later calls do nothing. On error the app
/// keeps running without file logging.
pub fn init() -> Result<(), LoggingError> {
    if FILE_WRITER.get().is_some() {
        return Ok(());
    }
    let dir = app_dirs::logs_dir()?;
    let path = start_launch_log(&dir, launch_time())?;
    prune_launch_logs(&dir, KEPT_LAUNCHES)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        &dir,
        path.file_name().unwrap_or_default(),
    ));
    let timer = OffsetTime::new(local_offset(), LINE_TIMESTAMP);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_timer(timer.clone()).with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_timer(timer).with_writer(writer));
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = FILE_WRITER.set(guard);

    tracing::info!("Writing log to {}", path.display());
    Ok(())
}

/// Create this launch's log file, named after `started`.
fn start_launch_log(dir: &Path, started: OffsetDateTime) -> Result<PathBuf, LoggingError> {
    let path = dir.join(started.format(FILE_NAME)?);
    File::options()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::CreateFile {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Delete all but the `keep` most recently modified `.log` files in `dir`.
fn prune_launch_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let prune_error = |source: std::io::Error| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    };
    let mut logs: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(prune_error)?.flatten() {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "log") {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if metadata.is_file() {
            logs.push((metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH), path));
        }
    }
    logs.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, path) in logs.iter().skip(keep) {
        tracing::debug!("Removing old log {}", path.display());
        fs::remove_file(path).map_err(prune_error)?;
    }
    Ok(())
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

fn launch_time() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset())
}
