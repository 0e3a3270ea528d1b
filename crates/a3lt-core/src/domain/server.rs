//! Server state as derived from the PID file and the process table.

use std::fmt;
use std::time::Duration;

/// State of the managed server, re-derived on every invocation.
///
/// An orphaned PID file never surfaces here: it is cleaned up while the
/// state is derived and reported as [`ServerState::Stopped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// No PID file.
    Stopped,
    /// PID file present and the recorded process is alive.
    Running { pid: u32 },
}

impl ServerState {
    /// The recorded PID, if running.
    pub const fn pid(self) -> Option<u32> {
        match self {
            Self::Running { pid } => Some(pid),
            Self::Stopped => None,
        }
    }

    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => f.write_str("stopped"),
            Self::Running { pid } => write!(f, "running (pid {pid})"),
        }
    }
}

/// How a `stop` reached confirmed death.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// The process exited after SIGTERM within the grace period.
    Graceful { waited: Duration },
    /// The grace period elapsed and SIGKILL was needed.
    Killed { waited: Duration },
    /// The process was already gone when signalled.
    AlreadyGone,
}

impl ShutdownOutcome {
    pub const fn was_forced(self) -> bool {
        matches!(self, Self::Killed { .. })
    }
}
