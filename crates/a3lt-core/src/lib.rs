//! Core domain for the Arma 3 Life server and build tools.
//!
//! This crate holds everything that does not touch the operating system's
//! process table: the typed configuration document and manifest selection,
//! launch argument construction, path resolution, the lifecycle error
//! taxonomy, and the [`ProcessControl`] port that the runtime crate
//! implements.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{
    ArtifactsSection, ConfigError, ConfigSource, ControlConfig, DEFAULT_BUILD_DIR,
    DEFAULT_PBO_PACKER, DEFAULT_SERVER_COMMAND, DEFAULT_SIGTERM_TIMEOUT_SECS, LaunchConfig,
    LoadedConfig, Manifest, ManifestServer, ModEntry, ModKind, ServerSection, ToolConfig,
    ToolsSection, load_config, select_manifest,
};
pub use domain::{ServerState, ShutdownOutcome};
pub use paths::{
    PathError, ResolvedPaths, data_root, default_log_dir, default_pid_file, ensure_directory,
    verify_writable,
};
pub use ports::{
    LaunchCommand, LifecycleError, ProcessControl, ServerExit, ServerOutput, ShutdownSignal,
    SignalDelivery, SpawnedServer,
};
