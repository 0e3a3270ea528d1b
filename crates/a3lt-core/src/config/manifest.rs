//! Deployment manifests and manifest selection.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Name of the manifest picked when none is requested explicitly.
pub const DEFAULT_MANIFEST: &str = "default";

/// One deployable server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Server identity and install location.
    pub server: ManifestServer,
    /// Config files and mods deployed with the server.
    #[serde(default)]
    pub artifacts: ArtifactsSection,
}

/// Server identity for a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestServer {
    /// Display name passed as `-name=`.
    pub name: String,
    /// Game port passed as `-port=`.
    pub port: u16,
    /// Installation root; also the server's working directory.
    pub root_directory: PathBuf,
}

/// Files deployed alongside the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArtifactsSection {
    /// Basic (network) config, passed as `-cfg=`.
    pub basic_config: Option<PathBuf>,
    /// Server config, passed as `-config=`.
    pub config: Option<PathBuf>,
    /// Mods in load order.
    pub mods: Vec<ModEntry>,
}

/// A mod or mission listed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModEntry {
    /// Directory name without the leading `@`.
    pub base_name: String,
    /// What kind of artifact this is.
    #[serde(rename = "type")]
    pub kind: ModKind,
    /// Terrain for missions (e.g. `Altis`).
    #[serde(default)]
    pub terrain: Option<String>,
    /// Replacement `mission.sqm` for missions.
    #[serde(default)]
    pub sqm: Option<PathBuf>,
}

/// Artifact kinds understood by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModKind {
    /// Loaded through `-serverMod=`.
    ServerMod,
    /// A mission packed into a PBO.
    Mpmission,
}

impl Manifest {
    /// Server mods in declaration order, rendered as `@<baseName>`.
    pub fn server_mods(&self) -> Vec<String> {
        self.artifacts
            .mods
            .iter()
            .filter(|entry| entry.kind == ModKind::ServerMod)
            .map(|entry| format!("@{}", entry.base_name))
            .collect()
    }
}

/// Pick the manifest to operate on.
///
/// Selection priority:
/// 1. The manifest named by `requested`, if given.
/// 2. The manifest named `default`.
/// 3. The only manifest, if exactly one is defined.
pub fn select_manifest<'a>(
    manifests: &'a BTreeMap<String, Manifest>,
    requested: Option<&str>,
) -> Result<(&'a str, &'a Manifest), ConfigError> {
    if let Some(name) = requested {
        return manifests
            .get_key_value(name)
            .map(|(key, manifest)| (key.as_str(), manifest))
            .ok_or_else(|| ConfigError::UnknownManifest {
                name: name.to_string(),
                available: available_names(manifests),
            });
    }

    if let Some((key, manifest)) = manifests.get_key_value(DEFAULT_MANIFEST) {
        return Ok((key.as_str(), manifest));
    }

    let mut iter = manifests.iter();
    match (iter.next(), iter.next()) {
        (Some((key, manifest)), None) => Ok((key.as_str(), manifest)),
        _ => Err(ConfigError::AmbiguousManifest {
            count: manifests.len(),
        }),
    }
}

fn available_names(manifests: &BTreeMap<String, Manifest>) -> String {
    if manifests.is_empty() {
        return "none".to_string();
    }
    manifests.keys().cloned().collect::<Vec<_>>().join(", ")
}
