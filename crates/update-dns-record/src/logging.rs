//! Log setup: stderr plus a daily rotating file

use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// File name prefix of the rotating log
pub const LOG_FILE_PREFIX: &str = "update-dns-record";

/// File name suffix of the rotating log
pub const LOG_FILE_SUFFIX: &str = "log";

/// Install the global subscriber
///
/// The returned guard flushes the file writer on drop; keep it alive until
/// the process exits.
pub fn init(config: &AppConfig) -> Result<WorkerGuard> {
    let appender = file_appender(config)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(config.log_level)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .context("Failed to set tracing subscriber")?;

    Ok(guard)
}

/// Build the daily rotating appender under `config.log_dir`
pub fn file_appender(config: &AppConfig) -> Result<RollingFileAppender> {
    fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {}", config.log_dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(config.log_length_days)
        .build(&config.log_dir)
        .with_context(|| format!("Failed to open log file in {}", config.log_dir.display()))
}
