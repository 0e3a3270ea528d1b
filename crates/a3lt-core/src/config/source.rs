//! Locating and reading the configuration document.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ConfigError;
use super::document::ToolConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "A3LT_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "a3lt.json";

/// Where the configuration document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line.
    Flag,
    /// The `A3LT_CONFIG` environment variable.
    Environment,
    /// `a3lt.json` in the working directory.
    WorkingDirectory,
    /// No file was found; built-in defaults apply.
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("--config"),
            Self::Environment => f.write_str(CONFIG_ENV),
            Self::WorkingDirectory => f.write_str("working directory"),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// A configuration document together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub document: ToolConfig,
    /// File the document was read from, if any.
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Load the configuration document.
///
/// Resolution order: `flag` → `A3LT_CONFIG` → `./a3lt.json` → defaults. An
/// explicitly named file (flag or environment) must exist; the working
/// directory file is optional.
pub fn load_config(flag: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    load_from(flag, env::var_os(CONFIG_ENV), &cwd)
}

fn load_from(
    flag: Option<&Path>,
    env_value: Option<OsString>,
    cwd: &Path,
) -> Result<LoadedConfig, ConfigError> {
    let explicit = flag
        .map(|path| (path.to_path_buf(), ConfigSource::Flag))
        .or_else(|| {
            env_value
                .filter(|value| !value.is_empty())
                .map(|value| (PathBuf::from(value), ConfigSource::Environment))
        });

    if let Some((path, source)) = explicit {
        let document = match read_document(&path)? {
            Some(document) => document,
            None => return Err(ConfigError::NotFound(path)),
        };
        debug!(path = %path.display(), %source, "Loaded configuration");
        return Ok(LoadedConfig {
            document,
            path: Some(path),
            source,
        });
    }

    let path = cwd.join(DEFAULT_CONFIG_FILE);
    match read_document(&path)? {
        Some(document) => {
            debug!(path = %path.display(), "Loaded configuration from working directory");
            Ok(LoadedConfig {
                document,
                path: Some(path),
                source: ConfigSource::WorkingDirectory,
            })
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(LoadedConfig {
                document: ToolConfig::default(),
                path: None,
                source: ConfigSource::Defaults,
            })
        }
    }
}

/// Read and parse a document, returning `None` if the file does not exist.
fn read_document(path: &Path) -> Result<Option<ToolConfig>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    ToolConfig::from_json(&text, path).map(Some)
}
