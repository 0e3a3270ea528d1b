//! Pure path resolver for diagnostics.
//!
//! Captures every location the tools read or write in one struct so the
//! `paths` command can print them and tests can compare them.

use std::fmt;
use std::path::PathBuf;

use super::{PathError, data_root};
use crate::config::{ConfigSource, LoadedConfig};

/// All resolved paths captured in a single struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root directory for tool state
    pub data_root: PathBuf,
    /// Configuration file, if one was found
    pub config_file: Option<PathBuf>,
    /// How the configuration was located
    pub config_source: ConfigSource,
    /// PID file used by the server tool
    pub pid_file: PathBuf,
    /// Log directory used by the server tool
    pub log_dir: PathBuf,
    /// Build directory used by the build tool
    pub build_dir: PathBuf,
}

impl ResolvedPaths {
    /// Resolve all paths for a loaded configuration.
    pub fn resolve(config: &LoadedConfig) -> Result<Self, PathError> {
        let server = &config.document.server;

        Ok(Self {
            data_root: data_root()?,
            config_file: config.path.clone(),
            config_source: config.source,
            pid_file: server.resolved_pid_file()?,
            log_dir: server.resolved_log_dir()?,
            build_dir: config.document.tools.build_dir.clone(),
        })
    }
}

impl fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "data_root = {}", self.data_root.display())?;
        match &self.config_file {
            Some(path) => writeln!(f, "config_file = {}", path.display())?,
            None => writeln!(f, "config_file = <none>")?,
        }
        writeln!(f, "config_source = {}", self.config_source)?;
        writeln!(f, "pid_file = {}", self.pid_file.display())?;
        writeln!(f, "log_dir = {}", self.log_dir.display())?;
        write!(f, "build_dir = {}", self.build_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolConfig;
    use crate::paths::DATA_DIR_ENV;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};
    use tempfile::tempdir;

    #[test]
    fn defaults_land_under_data_root() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp = tempdir().unwrap();
        let _env = EnvVarGuard::set(DATA_DIR_ENV, temp.path().to_string_lossy().as_ref());

        let loaded = LoadedConfig {
            document: ToolConfig::default(),
            path: None,
            source: ConfigSource::Defaults,
        };
        let paths = ResolvedPaths::resolve(&loaded).unwrap();

        assert_eq!(paths.pid_file, temp.path().join("a3sdt.arma3.pid"));
        assert_eq!(paths.log_dir, temp.path().join("logs"));
        assert_eq!(paths.build_dir, PathBuf::from("build"));

        let output = paths.to_string();
        assert!(output.contains("config_file = <none>"));
        assert!(output.contains("config_source = built-in defaults"));
        assert!(output.contains("build_dir = build"));
    }
}
