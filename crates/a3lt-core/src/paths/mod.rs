//! Where the tools keep their own state.
//!
//! Both binaries resolve the data root the same way (`A3LT_DATA_DIR`, then
//! the platform's local data directory) and derive the default PID file and
//! log directory from it.

mod ensure;
mod error;
mod platform;
mod resolver;

#[cfg(test)]
pub(crate) mod test_utils;

// Error type
pub use error::PathError;

// Roots and defaults
pub use platform::{DATA_DIR_ENV, data_root, default_log_dir, default_pid_file};

// Directory operations
pub use ensure::{ensure_directory, verify_writable};

// Pure resolver for the `paths` command
pub use resolver::ResolvedPaths;
