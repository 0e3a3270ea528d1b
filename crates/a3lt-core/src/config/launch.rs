//! Launch configuration derived from the document and one manifest.

use std::path::PathBuf;

use super::document::ToolConfig;
use super::manifest::select_manifest;
use super::ConfigError;

/// Everything needed to launch the server for one invocation.
///
/// Only `start` (alone or inside `restart`) builds one; the PID file and
/// grace period live in [`super::ControlConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Name of the manifest this configuration was built from.
    pub manifest_name: String,
    /// Server display name.
    pub server_name: String,
    /// Game port.
    pub port: u16,
    /// Installation root and working directory.
    pub root_directory: PathBuf,
    /// Executable name inside `root_directory`.
    pub binary_name: String,
    /// Basic (network) config file.
    pub basic_config: PathBuf,
    /// Server config file.
    pub config: PathBuf,
    /// Profiles directory.
    pub profiles_directory: PathBuf,
    /// Server mods, each already prefixed with `@`.
    pub server_mods: Vec<String>,
}

impl LaunchConfig {
    /// Build the launch configuration for the selected manifest.
    ///
    /// An unset profiles directory falls back to `<rootDirectory>/profiles`.
    pub fn from_config(config: &ToolConfig, manifest: Option<&str>) -> Result<Self, ConfigError> {
        let (manifest_name, manifest) = select_manifest(&config.manifests, manifest)?;
        let server = &config.server;

        if manifest.server.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "server.name",
                reason: "must not be empty".to_string(),
            });
        }
        if manifest.server.port == 0 {
            return Err(ConfigError::Invalid {
                field: "server.port",
                reason: "must be between 1 and 65535".to_string(),
            });
        }
        if server.command.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "server.command",
                reason: "must not be empty".to_string(),
            });
        }
        let basic_config = manifest.artifacts.basic_config.clone().ok_or_else(|| {
            ConfigError::MissingField {
                manifest: manifest_name.to_string(),
                field: "artifacts.basicConfig",
            }
        })?;
        let server_config =
            manifest
                .artifacts
                .config
                .clone()
                .ok_or_else(|| ConfigError::MissingField {
                    manifest: manifest_name.to_string(),
                    field: "artifacts.config",
                })?;

        let profiles_directory = server
            .profiles_directory
            .clone()
            .unwrap_or_else(|| manifest.server.root_directory.join("profiles"));

        Ok(Self {
            manifest_name: manifest_name.to_string(),
            server_name: manifest.server.name.clone(),
            port: manifest.server.port,
            root_directory: manifest.server.root_directory.clone(),
            binary_name: server.command.clone(),
            basic_config,
            config: server_config,
            profiles_directory,
            server_mods: manifest.server_mods(),
        })
    }

    /// Full path of the server executable.
    pub fn server_binary(&self) -> PathBuf {
        self.root_directory.join(&self.binary_name)
    }

    /// Server mods joined the way `-serverMod=` expects them.
    pub fn mod_list(&self) -> String {
        self.server_mods.join(";")
    }

    /// The server's argument vector, in the order the server expects.
    pub fn launch_args(&self) -> Vec<String> {
        vec![
            format!("-name={}", self.server_name),
            format!("-port={}", self.port),
            format!("-cfg={}", self.basic_config.display()),
            format!("-config={}", self.config.display()),
            format!("-profiles={}", self.profiles_directory.display()),
            format!("-serverMod={}", self.mod_list()),
            "-nosound".to_string(),
            "-autoInit".to_string(),
        ]
    }
}
