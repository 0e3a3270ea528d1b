//! Liveness probing for PIDs read back from disk.

#[cfg(target_os = "linux")]
use std::fs;

/// Check whether a process with this PID exists.
///
/// # Platform behavior
/// - **Unix**: `kill(pid, 0)`; `ESRCH` means gone, `EPERM` means it exists
///   but belongs to someone else.
/// - **Linux**: additionally treats zombies (`Z` in `/proc/<pid>/stat`) as
///   gone, since they can no longer be signalled into doing anything.
/// - **Other**: Always returns `false`.
pub fn pid_exists(pid: u32) -> bool {
    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        let Ok(raw) = i32::try_from(pid) else {
            return false;
        };
        if raw <= 0 {
            return false;
        }

        match kill(Pid::from_raw(raw), None) {
            Ok(()) | Err(Errno::EPERM) => !is_zombie(pid),
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        false
    }
}

#[cfg(target_os = "linux")]
fn is_zombie(pid: u32) -> bool {
    let Ok(stat) = fs::read_to_string(format!("/proc/{pid}/stat")) else {
        return false;
    };
    // The command name is parenthesised and may itself contain ") ".
    stat.rfind(')')
        .and_then(|end| stat[end + 1..].split_whitespace().next())
        .is_some_and(|state| state == "Z")
}

#[cfg(all(unix, not(target_os = "linux")))]
const fn is_zombie(_pid: u32) -> bool {
    false
}
