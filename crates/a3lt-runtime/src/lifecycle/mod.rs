//! The server lifecycle state machine.
//!
//! Every command starts from a fresh [`ServerState`] computed by
//! [`LifecycleManager::inspect`] and passes it explicitly into the
//! transition it wants. Nothing is cached between invocations; the PID file
//! is the only shared record.
//!
//! # Races
//!
//! Two `start` invocations running at the same moment can both observe
//! `Stopped` and both spawn a server. The PID file ends up holding whichever
//! PID was written last. This is a known limitation of a PID-file lock.

mod shutdown;

use a3lt_core::config::{ControlConfig, LaunchConfig};
use a3lt_core::domain::{ServerState, ShutdownOutcome};
use a3lt_core::paths::ensure_directory;
use a3lt_core::ports::{
    LaunchCommand, LifecycleError, ProcessControl, ServerExit, ServerOutput, ShutdownSignal,
};
use tracing::{debug, info, warn};

use crate::pidfile::{PidFile, PidRecord};

pub use shutdown::{KILL_CONFIRM_TIMEOUT, KILL_POLL_INTERVAL, POLL_INTERVAL, terminate};

/// How a started server's output is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    /// Append output to the server log and return immediately.
    #[default]
    Detached,
    /// Mirror output into the operator log; the caller is expected to
    /// [`LifecycleManager::supervise`] the server.
    Attached,
}

/// A server this invocation launched.
pub struct StartedServer {
    pub pid: u32,
    exit: Box<dyn ServerExit>,
}

impl StartedServer {
    /// Give up supervision and take the exit handle. Dropping it leaves the
    /// server running.
    pub fn into_exit(self) -> Box<dyn ServerExit> {
        self.exit
    }
}

impl std::fmt::Debug for StartedServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartedServer")
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

/// Drives start/stop/restart against one PID file.
///
/// The manager only knows how to find and stop a server. What to launch is
/// passed to [`Self::start`] and [`Self::restart`], so a broken manifest
/// never prevents stopping a running server.
pub struct LifecycleManager<C: ProcessControl> {
    config: ControlConfig,
    control: C,
    pid_file: PidFile,
}

impl<C: ProcessControl> LifecycleManager<C> {
    pub fn new(config: ControlConfig, control: C) -> Self {
        let pid_file = PidFile::new(config.pid_file.clone());
        Self {
            config,
            control,
            pid_file,
        }
    }

    pub const fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub const fn control(&self) -> &C {
        &self.control
    }

    pub const fn pid_file(&self) -> &PidFile {
        &self.pid_file
    }

    /// Compute the current state from the PID file and a liveness probe.
    ///
    /// A PID file naming a dead process, or holding anything that is not a
    /// usable PID, is an orphan: it is reported with a single warning,
    /// deleted, and the server is considered stopped.
    pub fn inspect(&self) -> Result<ServerState, LifecycleError> {
        let record = self.pid_file.read().map_err(|source| self.pid_file_error(source))?;

        match record {
            None => Ok(ServerState::Stopped),
            Some(PidRecord::Valid(pid)) if self.control.is_alive(pid) => {
                debug!(pid, "Server is running");
                Ok(ServerState::Running { pid })
            }
            Some(PidRecord::Valid(pid)) => {
                warn!(
                    pid,
                    pid_file = %self.pid_file.path().display(),
                    "Arma 3 PID file exists, but the specified PID is not running; cleaning up."
                );
                self.remove_pid_file()?;
                Ok(ServerState::Stopped)
            }
            Some(PidRecord::Corrupt(content)) => {
                warn!(
                    pid_file = %self.pid_file.path().display(),
                    %content,
                    "Arma 3 PID file does not contain a usable PID; cleaning up."
                );
                self.remove_pid_file()?;
                Ok(ServerState::Stopped)
            }
        }
    }

    /// Launch the server and record its PID.
    ///
    /// Fails with [`LifecycleError::AlreadyRunning`] without spawning when
    /// `state` is running. If the PID cannot be recorded the new server is
    /// killed so no unrecorded instance is left behind.
    pub fn start(
        &self,
        state: ServerState,
        launch: &LaunchConfig,
        mode: StartMode,
    ) -> Result<StartedServer, LifecycleError> {
        if let ServerState::Running { pid } = state {
            return Err(LifecycleError::AlreadyRunning { pid });
        }

        info!("Starting the Arma 3 server...");
        info!(
            manifest = %launch.manifest_name,
            name = %launch.server_name,
            port = launch.port,
            root = %launch.root_directory.display(),
            "Launching {}",
            launch.binary_name
        );

        let output = match mode {
            StartMode::Detached => {
                ensure_directory(&self.config.log_directory)?;
                ServerOutput::LogFile(self.config.server_log_file())
            }
            StartMode::Attached => ServerOutput::Mirror,
        };

        let command = LaunchCommand {
            program: launch.server_binary(),
            args: launch.launch_args(),
            working_directory: launch.root_directory.clone(),
            output,
        };

        let spawned = self
            .control
            .spawn(&command)
            .map_err(|source| LifecycleError::Spawn {
                binary: command.program.clone(),
                source,
            })?;
        let pid = spawned.pid;

        if let Err(source) = self.pid_file.write(pid) {
            warn!(pid, error = %source, "Could not record server PID; killing the server");
            if let Err(e) = self.control.signal(pid, ShutdownSignal::Forceful) {
                warn!(pid, error = %e, "Failed to kill unrecorded server");
            }
            return Err(self.pid_file_error(source));
        }

        match mode {
            StartMode::Detached => info!(
                pid,
                log = %self.config.server_log_file().display(),
                "The Arma 3 server has been started."
            ),
            StartMode::Attached => info!(pid, "The Arma 3 server has been started (attached)."),
        }

        Ok(StartedServer {
            pid,
            exit: spawned.exit,
        })
    }

    /// Stop the server recorded in `state` and remove the PID file.
    ///
    /// Fails with [`LifecycleError::NotRunning`] without signalling anything
    /// when `state` is stopped. On a signal error or a stalled kill the PID
    /// file is kept.
    pub async fn stop(&self, state: ServerState) -> Result<ShutdownOutcome, LifecycleError> {
        let ServerState::Running { pid } = state else {
            return Err(LifecycleError::NotRunning {
                pid_file: self.pid_file.path().to_path_buf(),
            });
        };

        info!(pid, "Stopping the Arma 3 server...");
        let outcome = terminate(&self.control, pid, self.config.shutdown_grace).await?;
        self.remove_pid_file()?;

        info!(pid, forced = outcome.was_forced(), "The Arma 3 server has been stopped.");
        Ok(outcome)
    }

    /// Stop then start. A stopped server is an error, exactly as for
    /// [`Self::stop`].
    pub async fn restart(
        &self,
        state: ServerState,
        launch: &LaunchConfig,
        mode: StartMode,
    ) -> Result<StartedServer, LifecycleError> {
        self.stop(state).await?;
        self.start(ServerState::Stopped, launch, mode)
    }

    /// Wait for an attached server to exit, then drop its PID file.
    ///
    /// The PID file is only removed while it still names this server.
    pub async fn supervise(&self, started: StartedServer) -> Result<Option<i32>, LifecycleError> {
        let pid = started.pid;
        let code = started
            .exit
            .wait()
            .await
            .map_err(|source| LifecycleError::Supervise { pid, source })?;

        match self.pid_file.read() {
            Ok(Some(PidRecord::Valid(recorded))) if recorded == pid => self.remove_pid_file()?,
            Ok(_) => debug!(pid, "PID file no longer names this server; leaving it"),
            Err(e) => warn!(pid, error = %e, "Could not read PID file after server exit"),
        }

        match code {
            Some(code) => info!(pid, code, "The Arma 3 server exited."),
            None => info!(pid, "The Arma 3 server was terminated by a signal."),
        }
        Ok(code)
    }

    fn remove_pid_file(&self) -> Result<(), LifecycleError> {
        self.pid_file
            .remove()
            .map_err(|source| self.pid_file_error(source))
    }

    fn pid_file_error(&self, source: std::io::Error) -> LifecycleError {
        LifecycleError::PidFile {
            path: self.pid_file.path().to_path_buf(),
            source,
        }
    }
}
