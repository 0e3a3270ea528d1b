//! Process runtime and OS-level concerns for the Arma 3 Life tools.
//!
//! This crate provides the concrete implementations behind the ports in
//! `a3lt-core`: PID file storage, liveness probing, signal delivery, the
//! server lifecycle state machine, and the mission build pipeline.

#![deny(unsafe_code)]

pub mod archive;
pub mod build_dir;
pub mod lifecycle;
pub mod pbo;
pub mod pidfile;
pub mod process;

pub use archive::{ArchiveBuilder, ArchiveError, ArchiveRequest, BuiltArchive};
pub use build_dir::{BUILD_TIMESTAMP_FORMAT, build_timestamp, clean_build_dir};
pub use lifecycle::{LifecycleManager, StartMode, StartedServer};
pub use pbo::{MapType, PackError, PackRequest, PackedPbo, PboBuilder};
pub use pidfile::{PidFile, PidRecord, pid_exists};
pub use process::SystemProcessControl;
