//! Mission PBO packing (`a3bt pack`).
//!
//! A pack run stages a copy of the mission source under
//! `<buildDir>/<timestamp>/<base>.<map>`, optionally swaps in a different
//! `mission.sqm`, then hands the staging folder to the external PBO packer.

mod error;
mod request;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use a3lt_core::config::ToolsSection;
use chrono::{DateTime, Utc};
use tokio::process::Command;
use tracing::{debug, info};

use crate::build_dir::{build_timestamp, copy_tree};

pub use error::PackError;
pub use request::{MapType, PackRequest, validate_pbo_name, validate_sqm_name};

/// Name of the mission file inside a mission folder.
pub const MISSION_SQM: &str = "mission.sqm";

/// Result of a successful pack run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedPbo {
    pub pbo: PathBuf,
    pub staging_dir: PathBuf,
    pub timestamp: String,
}

/// Drives the external PBO packer.
#[derive(Debug, Clone)]
pub struct PboBuilder {
    packer: String,
    build_dir: PathBuf,
}

impl PboBuilder {
    pub fn new(packer: impl Into<String>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            packer: packer.into(),
            build_dir: build_dir.into(),
        }
    }

    pub fn from_tools(tools: &ToolsSection) -> Self {
        Self::new(tools.pbo_packer.clone(), tools.build_dir.clone())
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub async fn pack(&self, request: &PackRequest) -> Result<PackedPbo, PackError> {
        self.pack_at(request, Utc::now()).await
    }

    /// Pack `request` as if the current time were `now`.
    pub async fn pack_at(
        &self,
        request: &PackRequest,
        now: DateTime<Utc>,
    ) -> Result<PackedPbo, PackError> {
        if request.base_name.trim().is_empty() {
            return Err(PackError::EmptyBaseName);
        }
        if !request.source_directory.is_dir() {
            return Err(PackError::SourceNotFound(request.source_directory.clone()));
        }
        if let Some(sqm) = &request.mission_sqm
            && !sqm.is_file()
        {
            return Err(PackError::MissionNotFound(sqm.clone()));
        }

        let timestamp = build_timestamp(now);
        let pbo_base = request.pbo_base();
        let build_dir = absolute(&self.build_dir)?;

        let output = match &request.output {
            Some(path) => absolute(path)?,
            None => build_dir.join(format!("{pbo_base}_{timestamp}.pbo")),
        };
        let staging_dir = build_dir.join(&timestamp).join(&pbo_base);

        info!(
            source = %request.source_directory.display(),
            staging = %staging_dir.display(),
            "Staging mission {pbo_base}"
        );
        copy_tree(&request.source_directory, &staging_dir).map_err(|source| PackError::Stage {
            from: request.source_directory.clone(),
            to: staging_dir.clone(),
            source,
        })?;

        if let Some(sqm) = &request.mission_sqm {
            let target = staging_dir.join(MISSION_SQM);
            debug!(sqm = %sqm.display(), "Replacing {MISSION_SQM}");
            fs::copy(sqm, &target).map_err(|source| PackError::Stage {
                from: sqm.clone(),
                to: target,
                source,
            })?;
        }

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|source| PackError::BuildDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let status = self.run_packer(&staging_dir, &output).await?;
        if !output.is_file() {
            return Err(PackError::OutputMissing {
                path: output,
                status,
            });
        }

        info!(pbo = %output.display(), "Packed {pbo_base}");
        Ok(PackedPbo {
            pbo: output,
            staging_dir,
            timestamp,
        })
    }

    async fn run_packer(&self, staging_dir: &Path, output: &Path) -> Result<Option<i32>, PackError> {
        debug!(
            packer = %self.packer,
            staging = %staging_dir.display(),
            output = %output.display(),
            "Running PBO packer"
        );

        let result = Command::new(&self.packer)
            .arg("-pack")
            .arg(staging_dir)
            .arg(output)
            .output()
            .await
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => PackError::PackerNotFound {
                    packer: self.packer.clone(),
                },
                _ => PackError::PackerLaunch {
                    packer: self.packer.clone(),
                    source,
                },
            })?;

        for line in String::from_utf8_lossy(&result.stdout).lines() {
            debug!(target: "a3lt::packer", "{line}");
        }
        for line in String::from_utf8_lossy(&result.stderr).lines() {
            debug!(target: "a3lt::packer", stream = "stderr", "{line}");
        }

        let code = result.status.code();
        debug!(code = ?code, "PBO packer finished");
        Ok(code)
    }
}

fn absolute(path: &Path) -> Result<PathBuf, PackError> {
    std::path::absolute(path).map_err(|source| PackError::BuildDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    const STAMP: &str = "03072016_090502";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 3, 7, 9, 5, 2).unwrap()
    }

    /// A packer that writes the listing of its staging folder, plus the
    /// mission file, into the output.
    fn fake_packer(dir: &Path, body: &str) -> String {
        let path = dir.join("fake-packer");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn listing_packer(dir: &Path) -> String {
        fake_packer(
            dir,
            r#"[ "$1" = "-pack" ] || exit 64
ls "$2" > "$3"
cat "$2/mission.sqm" >> "$3""#,
        )
    }

    fn mission_source(dir: &Path) -> PathBuf {
        let src = dir.join("Altis_Life.Altis");
        fs::create_dir_all(src.join("core")).unwrap();
        fs::write(src.join("description.ext"), "class Header {};").unwrap();
        fs::write(src.join(MISSION_SQM), "version=53;").unwrap();
        fs::write(src.join("core/fn_init.sqf"), "").unwrap();
        src
    }

    fn request(source: PathBuf) -> PackRequest {
        PackRequest {
            source_directory: source,
            base_name: "AltisLife".to_string(),
            map_type: MapType::Altis,
            mission_sqm: None,
            output: None,
        }
    }

    #[tokio::test]
    async fn pack_stages_source_and_runs_packer() {
        let dir = TempDir::new().unwrap();
        let build = dir.path().join("build");
        let builder = PboBuilder::new(listing_packer(dir.path()), &build);

        let packed = builder
            .pack_at(&request(mission_source(dir.path())), now())
            .await
            .unwrap();

        assert_eq!(packed.timestamp, STAMP);
        assert_eq!(packed.pbo, build.join(format!("AltisLife.Altis_{STAMP}.pbo")));
        assert_eq!(packed.staging_dir, build.join(STAMP).join("AltisLife.Altis"));
        assert!(packed.staging_dir.join("core/fn_init.sqf").is_file());

        let listing = fs::read_to_string(&packed.pbo).unwrap();
        assert!(listing.contains("description.ext"));
        assert!(listing.contains("version=53;"));
    }

    #[tokio::test]
    async fn replacement_sqm_is_packed() {
        let dir = TempDir::new().unwrap();
        let sqm = dir.path().join("event.sqm");
        fs::write(&sqm, "version=54; // event").unwrap();

        let mut req = request(mission_source(dir.path()));
        req.mission_sqm = Some(sqm);
        req.output = Some(dir.path().join("dist/Event.Altis.pbo"));

        let builder = PboBuilder::new(listing_packer(dir.path()), dir.path().join("build"));
        let packed = builder.pack_at(&req, now()).await.unwrap();

        assert_eq!(packed.pbo, dir.path().join("dist/Event.Altis.pbo"));
        let content = fs::read_to_string(&packed.pbo).unwrap();
        assert!(content.contains("version=54; // event"));
    }

    #[tokio::test]
    async fn missing_packer_is_reported_with_hint() {
        let dir = TempDir::new().unwrap();
        let builder = PboBuilder::new("a3lt-no-such-packer", dir.path().join("build"));

        let err = builder
            .pack_at(&request(mission_source(dir.path())), now())
            .await
            .unwrap_err();

        assert!(matches!(err, PackError::PackerNotFound { .. }), "got {err:?}");
        assert!(err.to_string().contains("PATH"));
    }

    #[tokio::test]
    async fn packer_that_writes_nothing_is_an_error() {
        let dir = TempDir::new().unwrap();
        let builder = PboBuilder::new(fake_packer(dir.path(), "exit 0"), dir.path().join("build"));

        let err = builder
            .pack_at(&request(mission_source(dir.path())), now())
            .await
            .unwrap_err();

        match err {
            PackError::OutputMissing { path, status } => {
                assert!(path.ends_with(format!("AltisLife.Altis_{STAMP}.pbo")));
                assert_eq!(status, Some(0));
            }
            other => panic!("expected OutputMissing, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_source_fails_before_staging() {
        let dir = TempDir::new().unwrap();
        let build = dir.path().join("build");
        let builder = PboBuilder::new("unused", &build);

        let err = builder
            .pack_at(&request(dir.path().join("nope")), now())
            .await
            .unwrap_err();

        assert!(matches!(err, PackError::SourceNotFound(_)));
        assert!(!build.exists());
    }
}
