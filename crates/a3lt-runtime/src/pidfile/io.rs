//! Atomic PID file I/O operations.
//!
//! Format: the decimal PID, nothing else.
//! ```text
//! <pid>
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// PID file content as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PidRecord {
    /// A usable PID.
    Valid(u32),
    /// Anything else: empty, non-numeric, zero, negative or out of range.
    Corrupt(String),
}

impl fmt::Display for PidRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(pid) => write!(f, "{pid}"),
            Self::Corrupt(raw) => write!(f, "{raw:?}"),
        }
    }
}

/// Handle to the server's PID file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the PID file. A missing file is `Ok(None)`.
    pub fn read(&self) -> io::Result<Option<PidRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(
                parse_pid(&content)
                    .map_or_else(|| PidRecord::Corrupt(content.trim().to_string()), PidRecord::Valid),
            )),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write the PID file atomically using temp file + rename.
    ///
    /// # Atomicity
    /// 1. Write to `<pid file>.tmp`
    /// 2. Rename over `<pid file>` (atomic on the same filesystem)
    ///
    /// A concurrent reader sees either the previous content or the new one,
    /// never a partial write.
    pub fn write(&self, pid: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, pid.to_string())?;

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(())
    }

    /// Delete the PID file (idempotent - no error if missing).
    pub fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Parse PID file content. Only `1..=i32::MAX` is accepted, since anything
/// larger cannot be handed to `kill(2)`.
pub fn parse_pid(content: &str) -> Option<u32> {
    let pid = content.trim().parse::<u32>().ok()?;
    (pid >= 1 && i32::try_from(pid).is_ok()).then_some(pid)
}
