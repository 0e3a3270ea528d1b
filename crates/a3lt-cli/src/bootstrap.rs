//! CLI bootstrap: environment and logging.
//!
//! Both binaries call into here before dispatching a command, so logging is
//! configured identically for them.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Operator log written by `a3sdt` inside the log directory.
pub const SERVER_TOOL_LOG: &str = "a3sdt.log";

/// Load a `.env` file from the working directory, if there is one.
pub fn load_environment() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Filter for the operator log: `-v` forces debug, otherwise `RUST_LOG`
/// applies and falls back to info.
pub fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing.
///
/// Logs are written to:
/// - stderr, for the operator
/// - `log_file`, when given, through a non-blocking writer
///
/// The returned guard flushes the file writer when dropped and must be held
/// until the process exits. If the log file cannot be opened, logging falls
/// back to stderr only and says so.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let mut file_error = None;
    let (file_layer, guard) = match log_file.map(open_log_file) {
        Some(Ok(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        Some(Err(e)) => {
            file_error = Some(e);
            (None, None)
        }
        None => (None, None),
    };

    let initialized = tracing_subscriber::registry()
        .with(log_filter(verbose))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .try_init()
        .is_ok();

    if initialized && let Some(e) = file_error {
        tracing::warn!("File logging disabled: {e}");
    }
    guard
}

fn open_log_file(path: &Path) -> Result<RollingFileAppender, String> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| format!("{} is not a file path", path.display()))?;

    std::fs::create_dir_all(dir).map_err(|e| format!("{}: {e}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .map_err(|e| format!("{}: {e}", path.display()))
}
