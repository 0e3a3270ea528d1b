//! Process control port.
//!
//! Everything the lifecycle manager needs from the operating system: spawn
//! a server, probe a PID for liveness, deliver a shutdown signal. Keeping
//! these behind a trait lets the state machine be tested against a fake
//! process table with a paused clock.

use std::fmt;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

/// Where the server's stdout and stderr go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerOutput {
    /// Append both streams to a file; the invocation does not wait.
    LogFile(PathBuf),
    /// Pipe both streams and mirror them into the operator log line by line.
    Mirror,
}

/// A fully-resolved command line for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_directory: PathBuf,
    pub output: ServerOutput,
}

/// Shutdown signals, in escalation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGTERM
    Graceful,
    /// SIGKILL
    Forceful,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graceful => f.write_str("SIGTERM"),
            Self::Forceful => f.write_str("SIGKILL"),
        }
    }
}

/// Result of a signal that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalDelivery {
    Delivered,
    /// No such process (`ESRCH`).
    ProcessGone,
}

/// Completion of a spawned server.
#[async_trait]
pub trait ServerExit: Send {
    /// Wait for the server to exit, returning its exit code when it has one.
    async fn wait(self: Box<Self>) -> io::Result<Option<i32>>;
}

/// A freshly spawned server.
pub struct SpawnedServer {
    pub pid: u32,
    /// Dropping this leaves the server running.
    pub exit: Box<dyn ServerExit>,
}

impl fmt::Debug for SpawnedServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpawnedServer")
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

/// OS process operations used by the lifecycle manager.
pub trait ProcessControl: Send + Sync {
    /// Launch the server. The returned PID is live at the time of return.
    fn spawn(&self, command: &LaunchCommand) -> io::Result<SpawnedServer>;

    /// Non-destructive existence check.
    fn is_alive(&self, pid: u32) -> bool;

    /// Deliver `signal` to `pid`.
    fn signal(&self, pid: u32, signal: ShutdownSignal) -> io::Result<SignalDelivery>;
}
