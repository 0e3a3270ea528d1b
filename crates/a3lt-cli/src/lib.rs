//! Command-line adapters for the Arma 3 Life tools.
//!
//! Two binaries share this library:
//! - `a3sdt` starts, stops and restarts the dedicated server
//! - `a3bt` packs mission PBOs and bundles build results

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use anyhow as _;
#[cfg(test)]
use tempfile as _;

// Runtime for the binaries' `#[tokio::main]`
use tokio as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::{SERVER_TOOL_LOG, init_logging, load_environment};
pub use commands::{ArchiveArgs, BuildCommand, PackArgs, ServerCommand};
pub use error::CliError;
pub use parser::{BtCli, SdtCli};
