//! Graceful shutdown with SIGTERM → SIGKILL escalation.

use std::time::Duration;

use a3lt_core::domain::ShutdownOutcome;
use a3lt_core::ports::{LifecycleError, ProcessControl, ShutdownSignal, SignalDelivery};
use tokio::time::sleep;
use tracing::{debug, warn};

/// How often liveness is probed while waiting out the grace period.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How often liveness is probed after SIGKILL.
pub const KILL_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long a process may survive SIGKILL before the stop is abandoned.
pub const KILL_CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);

/// Stop `pid`, escalating to SIGKILL if it outlives `grace`.
///
/// # Strategy
/// 1. Send SIGTERM
/// 2. Probe once per [`POLL_INTERVAL`] until the process is gone or `grace`
///    has elapsed
/// 3. If still alive, send SIGKILL exactly once
/// 4. Probe until the process is gone, giving up after
///    [`KILL_CONFIRM_TIMEOUT`]
///
/// `ESRCH` from either signal means the process is already gone, which is a
/// success. The caller owns PID file cleanup.
pub async fn terminate<C>(
    control: &C,
    pid: u32,
    grace: Duration,
) -> Result<ShutdownOutcome, LifecycleError>
where
    C: ProcessControl + ?Sized,
{
    // Phase 1: SIGTERM
    if deliver(control, pid, ShutdownSignal::Graceful)? == SignalDelivery::ProcessGone {
        debug!(pid, "Server was already gone before SIGTERM");
        return Ok(ShutdownOutcome::AlreadyGone);
    }

    let mut waited = Duration::ZERO;
    loop {
        if !control.is_alive(pid) {
            return Ok(ShutdownOutcome::Graceful { waited });
        }
        if waited >= grace {
            break;
        }
        sleep(POLL_INTERVAL).await;
        waited += POLL_INTERVAL;
    }

    // Phase 2: SIGKILL
    warn!(
        pid,
        "The Arma 3 server did not shut down after {} seconds. Killing forcibly...",
        grace.as_secs()
    );
    if deliver(control, pid, ShutdownSignal::Forceful)? == SignalDelivery::ProcessGone {
        // It exited between the last probe and the kill.
        return Ok(ShutdownOutcome::Graceful { waited });
    }

    let mut after_kill = Duration::ZERO;
    loop {
        if !control.is_alive(pid) {
            return Ok(ShutdownOutcome::Killed {
                waited: waited + after_kill,
            });
        }
        if after_kill >= KILL_CONFIRM_TIMEOUT {
            return Err(LifecycleError::ShutdownStalled {
                pid,
                waited: after_kill,
            });
        }
        sleep(KILL_POLL_INTERVAL).await;
        after_kill += KILL_POLL_INTERVAL;
    }
}

fn deliver<C>(control: &C, pid: u32, signal: ShutdownSignal) -> Result<SignalDelivery, LifecycleError>
where
    C: ProcessControl + ?Sized,
{
    debug!(pid, %signal, "Sending signal");
    control
        .signal(pid, signal)
        .map_err(|source| LifecycleError::Signal {
            pid,
            signal,
            source,
        })
}
