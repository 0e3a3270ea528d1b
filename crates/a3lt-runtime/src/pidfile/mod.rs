//! PID file storage and liveness probing for the detached server.

mod io;
mod verify;

pub use io::{PidFile, PidRecord, parse_pid};
pub use verify::pid_exists;
