//! Preparing directories before the tools write into them.

use std::fs;
use std::path::Path;

use super::error::PathError;

const PROBE_FILE: &str = ".a3lt_write_test";

/// Create `path` (and parents) if needed, then check it accepts new files.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() && !path.is_dir() {
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }
    fs::create_dir_all(path).map_err(|source| PathError::CreateFailed {
        path: path.to_path_buf(),
        source,
    })?;
    verify_writable(path)
}

/// Check that a file can be created in `path`, leaving nothing behind.
pub fn verify_writable(path: &Path) -> Result<(), PathError> {
    let probe = path.join(PROBE_FILE);
    fs::write(&probe, b"probe").map_err(|source| PathError::NotWritable {
        path: path.to_path_buf(),
        source,
    })?;
    let _ = fs::remove_file(&probe);
    Ok(())
}
