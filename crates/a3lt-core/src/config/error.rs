//! Configuration error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::paths::PathError;

/// Errors raised while loading the configuration document or deriving a
/// launch configuration from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file {0} does not exist")]
    NotFound(PathBuf),

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for the expected schema.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document declares a schema version this build does not understand.
    #[error("Unsupported configuration version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// A manifest was requested by name but is not defined.
    #[error("No manifest named \"{name}\" found (available: {available})")]
    UnknownManifest { name: String, available: String },

    /// No manifest could be picked without an explicit name.
    #[error(
        "Cannot choose a manifest: {count} defined and none named \"default\"; pass --manifest"
    )]
    AmbiguousManifest { count: usize },

    /// A manifest lacks a field the server launch needs.
    #[error("Manifest \"{manifest}\" is missing {field}")]
    MissingField {
        manifest: String,
        field: &'static str,
    },

    /// A value is present but outside its accepted range.
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// A default location could not be resolved.
    #[error(transparent)]
    Paths(#[from] PathError),
}
