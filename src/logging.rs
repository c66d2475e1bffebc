//! Logging setup on top of `tracing`.
//!
//! CLI commands log to stderr. The terminal browser owns the screen, so it logs to
//! a daily rolling file under the platform's local data directory instead.
//! `RUST_LOG` overrides the default filters in both cases.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const STDERR_LOG_FILTER: &str = "delivery_desk=warn";
const FILE_LOG_FILTER: &str = "delivery_desk=info,warn";
const LOG_FILE_PREFIX: &str = "delivery-desk.log";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Daily rolling files in the given directory
    File(PathBuf),
}

impl LogTarget {
    /// File target in the default log directory
    pub fn default_file() -> Result<Self> {
        Ok(Self::File(get_log_directory()?))
    }

    fn default_filter(&self) -> &'static str {
        match self {
            Self::Stderr => STDERR_LOG_FILTER,
            Self::File(_) => FILE_LOG_FILTER,
        }
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Fails if the log directory cannot be created or a global subscriber is
/// already set.
pub fn init(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(target.default_filter()));

    match &target {
        LogTarget::Stderr => {
            let subscriber = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to install log subscriber")?;
        }
        LogTarget::File(log_dir) => {
            std::fs::create_dir_all(log_dir).with_context(|| {
                format!("Failed to create log directory: {}", log_dir.display())
            })?;
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
            let subscriber = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to install log subscriber")?;
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "delivery-desk starting up");
            tracing::debug!(log_dir = %log_dir.display(), "Log directory");
        }
    }

    Ok(())
}

fn get_log_directory() -> Result<PathBuf> {
    let base_dir =
        dirs::data_local_dir().context("Could not determine local data directory")?;
    Ok(base_dir.join("delivery-desk").join("logs"))
}

/// Directory holding the browser's log files, if it can be determined
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}
