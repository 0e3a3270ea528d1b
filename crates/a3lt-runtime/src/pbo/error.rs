use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while packing a mission PBO.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("Source directory {} does not exist", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Mission file {} does not exist", .0.display())]
    MissionNotFound(PathBuf),

    #[error("Base name must not be empty")]
    EmptyBaseName,

    #[error("Unknown map type '{0}' (expected one of Altis, Stratis, Tanoa)")]
    UnknownMapType(String),

    #[error("'{value}' must end in {extension}")]
    InvalidExtension {
        value: String,
        extension: &'static str,
    },

    #[error("Failed to stage {} into {}: {source}", .from.display(), .to.display())]
    Stage {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Build directory {} could not be prepared: {source}", .path.display())]
    BuildDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("PBO packer '{packer}' was not found; make sure it is installed and on your PATH")]
    PackerNotFound { packer: String },

    #[error("Failed to run PBO packer '{packer}': {source}")]
    PackerLaunch {
        packer: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "PBO packer exited with {} but {} was not created",
        .status.map_or_else(|| "a signal".to_string(), |code| format!("status {code}")),
        .path.display()
    )]
    OutputMissing { path: PathBuf, status: Option<i32> },
}
