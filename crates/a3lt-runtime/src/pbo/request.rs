//! Inputs to a pack run, and the validators the CLI applies to them.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::PackError;

/// Terrains a mission can be packed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapType {
    Altis,
    Stratis,
    Tanoa,
}

impl MapType {
    pub const ALL: [Self; 3] = [Self::Altis, Self::Stratis, Self::Tanoa];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Altis => "Altis",
            Self::Stratis => "Stratis",
            Self::Tanoa => "Tanoa",
        }
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapType {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|map| map.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PackError::UnknownMapType(s.to_string()))
    }
}

/// One `a3bt pack` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackRequest {
    pub source_directory: PathBuf,
    pub base_name: String,
    pub map_type: MapType,
    /// Replacement for the source tree's `mission.sqm`.
    pub mission_sqm: Option<PathBuf>,
    /// Forced output file; defaults to a timestamped name in the build dir.
    pub output: Option<PathBuf>,
}

impl PackRequest {
    /// `<baseName>.<mapType>`, the name Arma expects for the mission folder.
    pub fn pbo_base(&self) -> String {
        format!("{}.{}", self.base_name, self.map_type)
    }
}

/// Accept a path only if it ends in `.pbo` (any case).
pub fn validate_pbo_name(value: &str) -> Result<PathBuf, PackError> {
    require_extension(value, ".pbo")
}

/// Accept a path only if it ends in `.sqm` (any case).
pub fn validate_sqm_name(value: &str) -> Result<PathBuf, PackError> {
    require_extension(value, ".sqm")
}

fn require_extension(value: &str, extension: &'static str) -> Result<PathBuf, PackError> {
    let matches = Path::new(value)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension.trim_start_matches('.')));
    if matches {
        Ok(PathBuf::from(value))
    } else {
        Err(PackError::InvalidExtension {
            value: value.to_string(),
            extension,
        })
    }
}
