//! OS-backed process control: spawning the server, probing and signalling
//! PIDs, and mirroring piped output into the operator log.

mod control;
mod signal;
mod stream;

pub use control::SystemProcessControl;
pub use signal::send_signal;
pub use stream::{OutputStream, read_lossy_lines, spawn_stream_reader};
