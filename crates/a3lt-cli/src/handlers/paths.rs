//! Paths command handler.
//!
//! Displays every resolved location for diagnostics: which configuration
//! file was used and why, the data root, and where the PID file, logs and
//! build output go.

use a3lt_core::{LoadedConfig, ResolvedPaths};

use crate::error::CliError;

/// Resolves and displays all paths in `key = value` format.
pub fn execute(loaded: &LoadedConfig) -> Result<(), CliError> {
    let paths = ResolvedPaths::resolve(loaded)?;
    println!("{paths}");
    Ok(())
}
