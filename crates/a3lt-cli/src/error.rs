//! CLI-specific error types and mappings.
//!
//! Every library error is wrapped unchanged; [`CliError::exit_code`] maps it
//! onto the sysexits-flavoured exit status the binaries return.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use a3lt_core::{ConfigError, LifecycleError, PathError};
use a3lt_runtime::{ArchiveError, PackError};
use thiserror::Error;
use tracing::error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Paths(#[from] PathError),

    #[error(transparent)]
    Pack(#[from] PackError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Argument validation that clap cannot express.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: The server was not in the state the command needs
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Lifecycle(err) => match err {
                LifecycleError::AlreadyRunning { .. } | LifecycleError::NotRunning { .. } => 1,
                LifecycleError::Spawn { .. }
                | LifecycleError::Signal { .. }
                | LifecycleError::ShutdownStalled { .. }
                | LifecycleError::Supervise { .. } => 71, // EX_OSERR
                LifecycleError::PidFile { .. } => 74,     // EX_IOERR
                LifecycleError::Paths(err) => path_exit_code(err),
            },
            Self::Config(err) => match err {
                ConfigError::Paths(err) => path_exit_code(err),
                _ => 78, // EX_CONFIG
            },
            Self::Paths(err) => path_exit_code(err),
            Self::Pack(err) => match err {
                PackError::SourceNotFound(_)
                | PackError::MissionNotFound(_)
                | PackError::EmptyBaseName
                | PackError::UnknownMapType(_)
                | PackError::InvalidExtension { .. } => 2,
                PackError::Stage { .. } | PackError::BuildDir { .. } => 74,
                PackError::PackerNotFound { .. }
                | PackError::PackerLaunch { .. }
                | PackError::OutputMissing { .. } => 70, // EX_SOFTWARE
            },
            Self::Archive(err) => match err {
                ArchiveError::NoArtifacts { .. } => 1,
                ArchiveError::IncludeNotFound(_) => 2,
                ArchiveError::Io { .. } | ArchiveError::Zip { .. } => 74,
            },
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io { .. } => 74,
        }
    }

    /// Log the error and turn it into the process exit status.
    pub fn report(&self) -> ExitCode {
        error!("{self}");
        ExitCode::from(self.exit_code())
    }
}

const fn path_exit_code(err: &PathError) -> u8 {
    match err {
        PathError::NoDataDir => 78,
        _ => 74,
    }
}
