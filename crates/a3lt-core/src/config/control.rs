//! Settings that locate and stop a running server.
//!
//! These come from the `server` section alone. `stop` and `status` must keep
//! working while a manifest is being edited, so nothing here looks at the
//! manifests.

use std::path::PathBuf;
use std::time::Duration;

use super::ConfigError;
use super::document::ServerSection;

/// File inside the log directory that receives detached server output.
pub const SERVER_LOG_FILE: &str = "arma3server.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlConfig {
    /// PID file location.
    pub pid_file: PathBuf,
    /// Wait between SIGTERM and SIGKILL.
    pub shutdown_grace: Duration,
    /// Directory for the tool log and server output.
    pub log_directory: PathBuf,
}

impl ControlConfig {
    /// Resolve the control settings, falling back to the data root for unset
    /// paths.
    pub fn from_section(server: &ServerSection) -> Result<Self, ConfigError> {
        if server.sigterm_timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "server.sigtermTimeoutSeconds",
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            pid_file: server.resolved_pid_file()?,
            shutdown_grace: Duration::from_secs(server.sigterm_timeout_seconds),
            log_directory: server.resolved_log_dir()?,
        })
    }

    /// Where detached server output is appended.
    pub fn server_log_file(&self) -> PathBuf {
        self.log_directory.join(SERVER_LOG_FILE)
    }
}
