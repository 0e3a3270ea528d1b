//! Data root and default file locations.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable that overrides the data root.
pub const DATA_DIR_ENV: &str = "A3LT_DATA_DIR";

/// Get the root directory for tool state (PID file, logs).
///
/// Resolution order:
/// 1. `A3LT_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/a3lt`)
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    let root = data_dir.join("a3lt");

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|source| PathError::CreateFailed {
            path: root.clone(),
            source,
        })?;
    }

    Ok(root)
}

/// Default location of the server PID file: `<data root>/a3sdt.arma3.pid`.
pub fn default_pid_file() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("a3sdt.arma3.pid"))
}

/// Default directory for tool and server logs: `<data root>/logs`.
pub fn default_log_dir() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("logs"))
}
