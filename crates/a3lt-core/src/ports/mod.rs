//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details: the runtime crate
//! provides the OS-backed [`ProcessControl`], tests provide fakes.

pub mod process_control;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::paths::PathError;

pub use process_control::{
    LaunchCommand, ProcessControl, ServerExit, ServerOutput, ShutdownSignal, SignalDelivery,
    SpawnedServer,
};

/// Errors raised by the server lifecycle commands.
///
/// An orphaned PID file has no variant here: it is logged and cleaned up,
/// never reported as a failure.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// `start` was requested while the server is running.
    #[error("The Arma 3 server is already running (PID {pid}); use 'restart' instead.")]
    AlreadyRunning { pid: u32 },

    /// `stop` was requested while the server is stopped.
    #[error(
        "The Arma 3 server is not running (or the PID file {} does not exist).",
        .pid_file.display()
    )]
    NotRunning { pid_file: PathBuf },

    /// The server executable could not be launched.
    #[error("Failed to launch {}: {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A signal could not be delivered for a reason other than the process
    /// being gone. The PID file is left in place.
    #[error("Failed to send {signal} to PID {pid}: {source}")]
    Signal {
        pid: u32,
        signal: ShutdownSignal,
        #[source]
        source: io::Error,
    },

    /// The process survived SIGKILL. The PID file is left in place.
    #[error("PID {pid} is still alive {} seconds after SIGKILL", .waited.as_secs())]
    ShutdownStalled { pid: u32, waited: Duration },

    /// Reading, writing or removing the PID file failed.
    #[error("PID file {} could not be updated: {source}", .path.display())]
    PidFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Waiting on an attached server failed.
    #[error("Lost track of server PID {pid}: {source}")]
    Supervise {
        pid: u32,
        #[source]
        source: io::Error,
    },

    /// A directory the lifecycle needs could not be prepared.
    #[error(transparent)]
    Paths(#[from] PathError),
}
