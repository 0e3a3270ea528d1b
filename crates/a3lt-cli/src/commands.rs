//! Subcommands for `a3sdt` and `a3bt`.

use std::path::PathBuf;

use a3lt_runtime::MapType;
use a3lt_runtime::pbo::{validate_pbo_name, validate_sqm_name};
use clap::{Args, Subcommand};

/// Server lifecycle commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ServerCommand {
    /// Start the server if it is not already running
    Start {
        /// Stay in the foreground and mirror server output until it exits
        #[arg(long)]
        attach: bool,
    },
    /// Stop the running server (SIGTERM, then SIGKILL after the grace period)
    Stop,
    /// Stop the running server and start it again
    Restart {
        /// Stay in the foreground after the restart
        #[arg(long)]
        attach: bool,
    },
    /// Report whether the server is running
    Status,
}

/// Mission build commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum BuildCommand {
    /// Delete the build directory
    Clean,
    /// Stage a mission folder and pack it into a PBO
    Pack(PackArgs),
    /// Bundle the newest PBO and supporting files into a zip
    Archive(ArchiveArgs),
    /// Show resolved configuration and data paths
    Paths,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct PackArgs {
    /// Mission source directory
    #[arg(short = 's', long = "source", value_name = "DIR")]
    pub source: PathBuf,

    /// Mission base name, e.g. AltisLife
    #[arg(short = 'b', long = "base-name", value_name = "NAME")]
    pub base_name: String,

    /// Terrain: Altis, Stratis or Tanoa
    #[arg(short = 'm', long = "map-type", value_name = "MAP", value_parser = parse_map_type)]
    pub map_type: MapType,

    /// Replacement mission.sqm
    #[arg(short = 'S', long = "sqm", value_name = "SQM", value_parser = parse_sqm)]
    pub sqm: Option<PathBuf>,

    /// Output PBO file name
    #[arg(short = 'o', long = "output", value_name = "PBO", value_parser = parse_pbo)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ArchiveArgs {
    /// Mission base name whose newest PBO is archived
    #[arg(short = 'b', long = "base-name", value_name = "NAME")]
    pub base_name: String,

    /// Extra file to place at the archive root (repeatable)
    #[arg(short = 'i', long = "include", value_name = "FILE")]
    pub include: Vec<PathBuf>,

    /// Output zip file
    #[arg(short = 'o', long = "output", value_name = "ZIP")]
    pub output: Option<PathBuf>,
}

fn parse_map_type(value: &str) -> Result<MapType, String> {
    value.parse().map_err(|e: a3lt_runtime::PackError| e.to_string())
}

fn parse_sqm(value: &str) -> Result<PathBuf, String> {
    validate_sqm_name(value).map_err(|e| e.to_string())
}

fn parse_pbo(value: &str) -> Result<PathBuf, String> {
    validate_pbo_name(value).map_err(|e| e.to_string())
}
