//! The on-disk configuration document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use super::manifest::Manifest;
use crate::paths::{PathError, default_log_dir, default_pid_file};

/// Schema version understood by this build.
pub const CONFIG_VERSION: u32 = 1;

/// Default PBO packer executable, looked up on `PATH`.
pub const DEFAULT_PBO_PACKER: &str = "PBOConsole.exe";

/// Default build directory, relative to the working directory.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Default server executable name inside the server root directory.
pub const DEFAULT_SERVER_COMMAND: &str = "arma3server";

/// Default grace period between SIGTERM and SIGKILL.
pub const DEFAULT_SIGTERM_TIMEOUT_SECS: u64 = 5000;

/// Root of the configuration document.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolConfig {
    /// Schema version, currently always `1`.
    pub version: u32,
    /// Build tool settings.
    pub tools: ToolsSection,
    /// Settings shared by every manifest's server.
    pub server: ServerSection,
    /// Named deployment manifests.
    pub manifests: BTreeMap<String, Manifest>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            tools: ToolsSection::default(),
            server: ServerSection::default(),
            manifests: BTreeMap::new(),
        }
    }
}

impl ToolConfig {
    /// Parse a document from JSON text and check its schema version.
    ///
    /// `origin` is only used to label errors.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let document: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        document.check_version()
    }

    fn check_version(self) -> Result<Self, ConfigError> {
        if self.version == CONFIG_VERSION {
            Ok(self)
        } else {
            Err(ConfigError::UnsupportedVersion {
                found: self.version,
                expected: CONFIG_VERSION,
            })
        }
    }
}

/// Build tool settings (`tools` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolsSection {
    /// PBO packer executable name or path.
    pub pbo_packer: String,
    /// Directory that receives staging trees, PBOs and archives.
    pub build_dir: PathBuf,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            pbo_packer: DEFAULT_PBO_PACKER.to_string(),
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
        }
    }
}

/// Server-wide settings (`server` section).
///
/// Paths left unset fall back to locations under the data root, or under the
/// manifest's server root for the profiles directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerSection {
    /// Executable name inside the server root directory.
    pub command: String,
    /// Location of the PID file.
    pub pid_file: Option<PathBuf>,
    /// Seconds to wait after SIGTERM before sending SIGKILL.
    pub sigterm_timeout_seconds: u64,
    /// Server profiles directory.
    pub profiles_directory: Option<PathBuf>,
    /// Directory for the tool log and the server output log.
    pub log_directory: Option<PathBuf>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            command: DEFAULT_SERVER_COMMAND.to_string(),
            pid_file: None,
            sigterm_timeout_seconds: DEFAULT_SIGTERM_TIMEOUT_SECS,
            profiles_directory: None,
            log_directory: None,
        }
    }
}

impl ServerSection {
    /// `pidFile`, else `<data root>/a3sdt.arma3.pid`.
    pub fn resolved_pid_file(&self) -> Result<PathBuf, PathError> {
        match &self.pid_file {
            Some(path) => Ok(path.clone()),
            None => default_pid_file(),
        }
    }

    /// `logDirectory`, else `<data root>/logs`.
    pub fn resolved_log_dir(&self) -> Result<PathBuf, PathError> {
        match &self.log_directory {
            Some(path) => Ok(path.clone()),
            None => default_log_dir(),
        }
    }
}
