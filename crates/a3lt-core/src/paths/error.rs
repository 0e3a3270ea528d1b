//! Errors for data-root resolution and directory preparation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    /// The platform has no local data directory and `A3LT_DATA_DIR` is unset.
    #[error("Cannot determine a data directory; set A3LT_DATA_DIR")]
    NoDataDir,

    #[error("{} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Directory {} is not writable: {source}", .path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
