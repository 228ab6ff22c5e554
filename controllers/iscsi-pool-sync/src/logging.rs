//! Log destination setup.

use crate::error::ControllerError;
use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, appending plain-text records to `path`.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`. The file stays open
/// for the life of the process.
pub fn init(path: &Path) -> Result<(), ControllerError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o644)
        .open(path)
        .map_err(|e| {
            ControllerError::Logging(format!("cannot open log file {}: {}", path.display(), e))
        })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| ControllerError::Logging(e.to_string()))
}
