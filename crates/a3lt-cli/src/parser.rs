//! Top-level parsers for both binaries.
//!
//! Global options are shared between subcommands and may appear anywhere on
//! the command line.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::{BuildCommand, ServerCommand};

/// `a3sdt`: Arma 3 server daemon tool.
#[derive(Debug, Parser)]
#[command(name = "a3sdt")]
#[command(about = "Start, stop and restart the Arma 3 dedicated server")]
#[command(version)]
pub struct SdtCli {
    /// Configuration file (defaults to $A3LT_CONFIG, then ./a3lt.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Manifest to launch when the configuration defines several
    #[arg(short, long, global = true, env = "A3LT_MANIFEST", value_name = "NAME")]
    pub manifest: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: ServerCommand,
}

/// `a3bt`: Arma 3 build tool.
#[derive(Debug, Parser)]
#[command(name = "a3bt")]
#[command(about = "Pack Arma 3 Life missions and bundle build results")]
#[command(version)]
pub struct BtCli {
    /// Configuration file (defaults to $A3LT_CONFIG, then ./a3lt.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: BuildCommand,
}
