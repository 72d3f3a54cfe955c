use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "djdash=info";

/// Where log files go: $XDG_DATA_HOME/djdash/logs
pub fn log_dir() -> Option<PathBuf> {
  dirs::data_dir().map(|d| d.join("djdash").join("logs"))
}

/// Build the filter: explicit level, then RUST_LOG, then the default
fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
  match level {
    Some(level) => {
      EnvFilter::try_new(level).map_err(|e| eyre!("Invalid log level {}: {}", level, e))
    }
    None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
  }
}

/// Log to a daily rolling file since the terminal belongs to the UI.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(level: Option<&str>) -> Result<Option<WorkerGuard>> {
  let filter = build_filter(level)?;
  let Some(dir) = log_dir() else {
    // Nowhere to write; run without logs
    return Ok(None);
  };
  std::fs::create_dir_all(&dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let appender = tracing_appender::rolling::daily(&dir, "djdash.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false),
    )
    .try_init()
    .map_err(|e| eyre!("Failed to initialise logging: {}", e))?;

  Ok(Some(guard))
}
