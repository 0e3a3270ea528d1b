//! Results archive packaging (`a3bt archive`).
//!
//! The newest packed PBO for a mission is bundled with any supporting files
//! into a zip laid out the way a server expects to receive it:
//!
//! ```text
//! <archive>.zip
//! ├── mpmissions/<base>.<map>_<timestamp>.pbo
//! └── <each included file>
//! ```

mod error;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::build_dir::build_timestamp;

pub use error::ArchiveError;

/// Folder inside the archive that receives the PBO.
pub const MISSIONS_DIR: &str = "mpmissions";

/// One `a3bt archive` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    pub base_name: String,
    /// Extra files placed at the archive root.
    pub includes: Vec<PathBuf>,
    /// Forced archive path; defaults to `<buildDir>/<base>_<timestamp>.zip`.
    pub output: Option<PathBuf>,
}

/// A finished archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltArchive {
    pub archive: PathBuf,
    pub pbo: PathBuf,
    /// Archive entry names, in the order they were written.
    pub entries: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    build_dir: PathBuf,
}

impl ArchiveBuilder {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
        }
    }

    pub fn build(&self, request: &ArchiveRequest) -> Result<BuiltArchive, ArchiveError> {
        self.build_at(request, Utc::now())
    }

    /// Build the archive as if the current time were `now`.
    pub fn build_at(
        &self,
        request: &ArchiveRequest,
        now: DateTime<Utc>,
    ) -> Result<BuiltArchive, ArchiveError> {
        for include in &request.includes {
            if !include.is_file() {
                return Err(ArchiveError::IncludeNotFound(include.clone()));
            }
        }

        let pbo = newest_pbo(&self.build_dir, &request.base_name)?;
        let timestamp = build_timestamp(now);
        let staging = self.build_dir.join(format!("{timestamp}_archive"));
        let archive = request.output.clone().unwrap_or_else(|| {
            self.build_dir
                .join(format!("{}_{timestamp}.zip", request.base_name))
        });

        info!(pbo = %pbo.display(), "Archiving {}", request.base_name);
        stage(&staging, &pbo, &request.includes)?;

        let result = zip_directory(&staging, &archive);
        if let Err(e) = fs::remove_dir_all(&staging) {
            debug!(staging = %staging.display(), error = %e, "Failed to remove archive staging");
        }
        let entries = result?;

        info!(archive = %archive.display(), entries = entries.len(), "Archive written");
        Ok(BuiltArchive {
            archive,
            pbo,
            entries,
        })
    }
}

/// Pick the most recently modified `<base_name>*.pbo` in `build_dir`.
///
/// Ties on modification time go to the lexically greatest name, which for
/// timestamped outputs of the same day is the later one.
fn newest_pbo(build_dir: &Path, base_name: &str) -> Result<PathBuf, ArchiveError> {
    let no_artifacts = || ArchiveError::NoArtifacts {
        build_dir: build_dir.to_path_buf(),
        base_name: base_name.to_string(),
    };

    let entries = match fs::read_dir(build_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(no_artifacts()),
        Err(source) => return Err(io_error(build_dir, source)),
    };

    let mut best: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|source| io_error(build_dir, source))?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let is_pbo = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pbo"));
        if !is_pbo || !name.starts_with(base_name) || !path.is_file() {
            continue;
        }

        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .map_err(|source| io_error(&path, source))?;
        let newer = best
            .as_ref()
            .is_none_or(|(time, current)| (modified, &path) > (*time, current));
        if newer {
            best = Some((modified, path));
        }
    }

    best.map(|(_, path)| path).ok_or_else(no_artifacts)
}

fn stage(staging: &Path, pbo: &Path, includes: &[PathBuf]) -> Result<(), ArchiveError> {
    let missions = staging.join(MISSIONS_DIR);
    fs::create_dir_all(&missions).map_err(|source| io_error(&missions, source))?;

    copy_named(pbo, &missions)?;
    for include in includes {
        copy_named(include, staging)?;
    }
    Ok(())
}

fn copy_named(file: &Path, into: &Path) -> Result<(), ArchiveError> {
    let Some(name) = file.file_name() else {
        return Err(ArchiveError::IncludeNotFound(file.to_path_buf()));
    };
    let target = into.join(name);
    fs::copy(file, &target).map_err(|source| io_error(&target, source))?;
    Ok(())
}

/// Zip everything under `root` into `archive`, with `/`-separated entry
/// names relative to `root`.
fn zip_directory(root: &Path, archive: &Path) -> Result<Vec<String>, ArchiveError> {
    if let Some(parent) = archive.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }

    let file = File::create(archive).map_err(|source| io_error(archive, source))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let zip_error = |source| ArchiveError::Zip {
        path: archive.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    collect_files(root, root, &mut files)?;
    files.sort();

    let mut entries = Vec::with_capacity(files.len());
    for (name, path) in files {
        debug!(entry = %name, "Adding to archive");
        writer.start_file(name.as_str(), options).map_err(zip_error)?;
        let mut source = File::open(&path).map_err(|e| io_error(&path, e))?;
        io::copy(&mut source, &mut writer).map_err(|e| io_error(archive, e))?;
        entries.push(name);
    }

    writer.finish().map_err(zip_error)?;
    Ok(entries)
}

fn collect_files(
    root: &Path,
    dir: &Path,
    out: &mut Vec<(String, PathBuf)>,
) -> Result<(), ArchiveError> {
    for entry in fs::read_dir(dir).map_err(|source| io_error(dir, source))? {
        let path = entry.map_err(|source| io_error(dir, source))?.path();
        if path.is_dir() {
            collect_files(root, &path, out)?;
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        out.push((name, path));
    }
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Read;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 3, 7, 9, 5, 2).unwrap()
    }

    fn set_mtime(path: &Path, secs_after_epoch: u64) {
        let time = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(secs_after_epoch);
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    fn read_entry(archive: &Path, name: &str) -> String {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        let mut entry = zip.by_name(name).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn archive_bundles_newest_pbo_and_includes() {
        let dir = TempDir::new().unwrap();
        let build = dir.path().join("build");
        fs::create_dir_all(&build).unwrap();

        let old = build.join("AltisLife.Altis_01012016_000000.pbo");
        let new = build.join("AltisLife.Altis_02012016_000000.pbo");
        fs::write(&old, "old").unwrap();
        fs::write(&new, "new").unwrap();
        fs::write(build.join("Other.Altis_03012016_000000.pbo"), "other").unwrap();
        set_mtime(&old, 1_000);
        set_mtime(&new, 2_000);

        let readme = dir.path().join("README.txt");
        fs::write(&readme, "install me").unwrap();

        let builder = ArchiveBuilder::new(&build);
        let built = builder
            .build_at(
                &ArchiveRequest {
                    base_name: "AltisLife".to_string(),
                    includes: vec![readme],
                    output: None,
                },
                now(),
            )
            .unwrap();

        assert_eq!(built.pbo, new);
        assert_eq!(built.archive, build.join("AltisLife_03072016_090502.zip"));
        assert_eq!(
            built.entries,
            vec![
                "README.txt".to_string(),
                "mpmissions/AltisLife.Altis_02012016_000000.pbo".to_string(),
            ]
        );
        assert_eq!(
            read_entry(&built.archive, "mpmissions/AltisLife.Altis_02012016_000000.pbo"),
            "new"
        );
        assert_eq!(read_entry(&built.archive, "README.txt"), "install me");
        assert!(!build.join("03072016_090502_archive").exists());
    }

    #[test]
    fn explicit_output_path_is_used() {
        let dir = TempDir::new().unwrap();
        let build = dir.path().join("build");
        fs::create_dir_all(&build).unwrap();
        fs::write(build.join("AltisLife.Tanoa_x.PBO"), "pbo").unwrap();

        let output = dir.path().join("dist/release.zip");
        let built = ArchiveBuilder::new(&build)
            .build_at(
                &ArchiveRequest {
                    base_name: "AltisLife".to_string(),
                    includes: Vec::new(),
                    output: Some(output.clone()),
                },
                now(),
            )
            .unwrap();

        assert_eq!(built.archive, output);
        assert_eq!(read_entry(&output, "mpmissions/AltisLife.Tanoa_x.PBO"), "pbo");
    }

    #[test]
    fn no_matching_pbo_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = ArchiveBuilder::new(dir.path().join("build"))
            .build_at(
                &ArchiveRequest {
                    base_name: "AltisLife".to_string(),
                    includes: Vec::new(),
                    output: None,
                },
                now(),
            )
            .unwrap_err();

        assert!(matches!(err, ArchiveError::NoArtifacts { .. }));
    }

    #[test]
    fn missing_include_fails_before_staging() {
        let dir = TempDir::new().unwrap();
        let build = dir.path().join("build");
        fs::create_dir_all(&build).unwrap();
        fs::write(build.join("AltisLife.Altis_x.pbo"), "pbo").unwrap();

        let err = ArchiveBuilder::new(&build)
            .build_at(
                &ArchiveRequest {
                    base_name: "AltisLife".to_string(),
                    includes: vec![dir.path().join("missing.txt")],
                    output: None,
                },
                now(),
            )
            .unwrap_err();

        assert!(matches!(err, ArchiveError::IncludeNotFound(_)));
        assert_eq!(fs::read_dir(&build).unwrap().count(), 1);
    }
}
