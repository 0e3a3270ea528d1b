//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `execute(<inputs>) -> Result<_, CliError>`
//! - Thin wrappers that:
//!   1. Build the runtime component from configuration
//!   2. Call it
//!   3. Format output for the terminal
//!
//! Handlers should NOT contain lifecycle or build logic.

pub mod archive;
pub mod clean;
pub mod pack;
pub mod paths;
pub mod server;
