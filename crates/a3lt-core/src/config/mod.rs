//! Typed configuration for both tools.
//!
//! The configuration lives in a single JSON document (`a3lt.json` by
//! default). It carries build-tool settings (`tools`), server-wide defaults
//! (`server`) and one or more named deployment manifests. Every server
//! command derives a [`ControlConfig`] from the `server` section; `start`
//! additionally derives a [`LaunchConfig`] from the selected manifest.
//! Neither is persisted.

mod control;
mod document;
mod error;
mod launch;
mod manifest;
mod source;

pub use control::{ControlConfig, SERVER_LOG_FILE};
pub use document::{
    CONFIG_VERSION, DEFAULT_BUILD_DIR, DEFAULT_PBO_PACKER, DEFAULT_SERVER_COMMAND,
    DEFAULT_SIGTERM_TIMEOUT_SECS, ServerSection, ToolConfig, ToolsSection,
};
pub use error::ConfigError;
pub use launch::LaunchConfig;
pub use manifest::{
    ArtifactsSection, DEFAULT_MANIFEST, Manifest, ManifestServer, ModEntry, ModKind,
    select_manifest,
};
pub use source::{CONFIG_ENV, ConfigSource, DEFAULT_CONFIG_FILE, LoadedConfig, load_config};
