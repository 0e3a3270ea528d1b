use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while bundling build results.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("No {base_name}*.pbo found in {}; run 'a3bt pack' first", .build_dir.display())]
    NoArtifacts { build_dir: PathBuf, base_name: String },

    #[error("Included file {} does not exist", .0.display())]
    IncludeNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write archive {}: {source}", .path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}
