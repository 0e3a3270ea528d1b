//! Deliver shutdown signals by PID.

use std::io;

use a3lt_core::ports::{ShutdownSignal, SignalDelivery};

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Send `signal` to `pid`.
///
/// # Returns
/// - `Ok(Delivered)` if the kernel accepted the signal
/// - `Ok(ProcessGone)` on `ESRCH`
/// - `Err` for anything else (for example `EPERM`)
pub fn send_signal(pid: u32, signal: ShutdownSignal) -> io::Result<SignalDelivery> {
    #[cfg(unix)]
    {
        send_signal_unix(pid, signal)
    }

    #[cfg(not(unix))]
    {
        let _ = (pid, signal);
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "signal delivery is only implemented on Unix",
        ))
    }
}

#[cfg(unix)]
fn send_signal_unix(pid: u32, signal: ShutdownSignal) -> io::Result<SignalDelivery> {
    let raw = i32::try_from(pid)
        .ok()
        .filter(|raw| *raw > 0)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid PID {pid}")))?;

    let nix_signal = match signal {
        ShutdownSignal::Graceful => Signal::SIGTERM,
        ShutdownSignal::Forceful => Signal::SIGKILL,
    };

    match signal::kill(Pid::from_raw(raw), nix_signal) {
        Ok(()) => Ok(SignalDelivery::Delivered),
        Err(Errno::ESRCH) => Ok(SignalDelivery::ProcessGone),
        Err(e) => Err(io::Error::from_raw_os_error(e as i32)),
    }
}
