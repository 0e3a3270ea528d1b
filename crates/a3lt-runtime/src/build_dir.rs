//! Shared helpers for the build directory: run timestamps, recursive copies
//! and cleaning.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// `strftime` pattern used to name build outputs and staging directories.
pub const BUILD_TIMESTAMP_FORMAT: &str = "%m%d%Y_%H%M%S";

/// Format `now` for use in build artifact names.
pub fn build_timestamp(now: DateTime<Utc>) -> String {
    now.format(BUILD_TIMESTAMP_FORMAT).to_string()
}

/// Remove the build directory and everything in it.
///
/// Returns `true` if something was removed; a missing directory is not an
/// error.
pub fn clean_build_dir(build_dir: &Path) -> io::Result<bool> {
    match fs::remove_dir_all(build_dir) {
        Ok(()) => {
            info!(build_dir = %build_dir.display(), "Removed build directory");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(build_dir = %build_dir.display(), "Build directory already absent");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Recursively copy `from` into `to`, creating `to` and any missing parents.
///
/// Symlinks are followed.
pub(crate) fn copy_tree(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        if fs::metadata(&source)?.is_dir() {
            copy_tree(&source, &target)?;
        } else {
            fs::copy(&source, &target)?;
        }
    }
    Ok(())
}
