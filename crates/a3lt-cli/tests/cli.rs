//! Black-box tests that run the compiled binaries.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::Result;
use tempfile::TempDir;

const A3SDT: &str = env!("CARGO_BIN_EXE_a3sdt");
const A3BT: &str = env!("CARGO_BIN_EXE_a3bt");

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// A scratch workspace with an `a3lt.json` whose server lives in
    /// `<dir>/arma3` and whose state stays inside `<dir>`.
    fn new(grace_secs: u64) -> Result<Self> {
        let dir = TempDir::new()?;
        let root = dir.path().join("arma3");
        fs::create_dir_all(&root)?;

        let config = serde_like_config(dir.path(), &root, grace_secs);
        fs::write(dir.path().join("a3lt.json"), config)?;
        Ok(Self { dir })
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn pid_file(&self) -> PathBuf {
        self.path().join("state/a3sdt.arma3.pid")
    }

    fn run(&self, binary: &str, args: &[&str]) -> Result<Output> {
        Ok(Command::new(binary)
            .args(args)
            .current_dir(self.path())
            .env("A3LT_DATA_DIR", self.path().join("data"))
            .env_remove("A3LT_CONFIG")
            .env_remove("A3LT_MANIFEST")
            .env_remove("RUST_LOG")
            .output()?)
    }
}

fn serde_like_config(dir: &Path, root: &Path, grace_secs: u64) -> String {
    format!(
        r#"{{
    "version": 1,
    "tools": {{ "buildDir": "{build}" }},
    "server": {{
        "pidFile": "{pid}",
        "logDirectory": "{logs}",
        "sigtermTimeoutSeconds": {grace_secs}
    }},
    "manifests": {{
        "default": {{
            "server": {{ "name": "Altis Life", "port": 2302, "rootDirectory": "{root}" }},
            "artifacts": {{
                "basicConfig": "{root}/basic.cfg",
                "config": "{root}/server.cfg",
                "mods": [{{ "baseName": "life_server", "type": "serverMod" }}]
            }}
        }}
    }}
}}"#,
        build = dir.join("build").display(),
        pid = dir.join("state/a3sdt.arma3.pid").display(),
        logs = dir.join("logs").display(),
        root = root.display(),
    )
}

#[test]
fn status_reports_stopped() -> Result<()> {
    let ws = Workspace::new(5)?;

    let output = ws.run(A3SDT, &["status"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "stopped");
    assert!(ws.path().join("logs/a3sdt.log").is_file());
    Ok(())
}

#[test]
fn stop_when_not_running_exits_one() -> Result<()> {
    let ws = Workspace::new(5)?;

    let output = ws.run(A3SDT, &["stop"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not running"));
    Ok(())
}

#[test]
fn unknown_manifest_only_matters_to_start() -> Result<()> {
    let ws = Workspace::new(5)?;

    let start = ws.run(A3SDT, &["--manifest", "tanoaLife", "start"])?;
    assert_eq!(start.status.code(), Some(78));
    assert!(!ws.pid_file().exists());

    let status = ws.run(A3SDT, &["--manifest", "tanoaLife", "status"])?;
    assert_eq!(status.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&status.stdout).trim(), "stopped");
    Ok(())
}

#[test]
fn malformed_config_is_a_config_error() -> Result<()> {
    let ws = Workspace::new(5)?;
    fs::write(ws.path().join("a3lt.json"), "{ not json")?;

    assert_eq!(ws.run(A3SDT, &["status"])?.status.code(), Some(78));
    assert_eq!(ws.run(A3BT, &["paths"])?.status.code(), Some(78));
    Ok(())
}

#[test]
fn build_tool_paths_and_clean() -> Result<()> {
    let ws = Workspace::new(5)?;
    fs::create_dir_all(ws.path().join("build/01012016_000000"))?;

    let paths = ws.run(A3BT, &["paths"])?;
    let stdout = String::from_utf8_lossy(&paths.stdout);
    assert_eq!(paths.status.code(), Some(0));
    assert!(stdout.contains("a3lt.json"), "paths: {stdout}");
    assert!(stdout.contains(&format!("build_dir = {}", ws.path().join("build").display())));

    let clean = ws.run(A3BT, &["clean"])?;
    assert_eq!(clean.status.code(), Some(0));
    assert!(!ws.path().join("build").exists());
    Ok(())
}

#[test]
fn archive_without_artifacts_exits_one() -> Result<()> {
    let ws = Workspace::new(5)?;

    let output = ws.run(A3BT, &["archive", "-b", "AltisLife"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("a3bt pack"));
    Ok(())
}

#[test]
fn invalid_pack_arguments_exit_two() -> Result<()> {
    let ws = Workspace::new(5)?;

    let output = ws.run(A3BT, &["pack", "-s", "src", "-b", "life", "-m", "Malden"])?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[cfg(unix)]
#[test]
fn start_then_stop_a_server_ignoring_sigterm() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    use std::time::{Duration, Instant};

    let ws = Workspace::new(2)?;
    let binary = ws.path().join("arma3/arma3server");
    fs::write(
        &binary,
        "#!/bin/sh\ntrap '' TERM\necho \"started $*\"\nwhile true; do sleep 1; done\n",
    )?;
    fs::set_permissions(&binary, fs::Permissions::from_mode(0o755))?;

    let start = ws.run(A3SDT, &["start"])?;
    assert_eq!(start.status.code(), Some(0), "{}", String::from_utf8_lossy(&start.stderr));
    let pid = fs::read_to_string(ws.pid_file())?;
    assert!(pid.parse::<u32>().is_ok());

    let again = ws.run(A3SDT, &["start"])?;
    assert_eq!(again.status.code(), Some(1));

    let status = ws.run(A3SDT, &["status"])?;
    assert_eq!(
        String::from_utf8_lossy(&status.stdout).trim(),
        format!("running (pid {pid})")
    );

    // Let the shell install its trap before signalling it.
    std::thread::sleep(Duration::from_millis(500));

    let began = Instant::now();
    let stop = ws.run(A3SDT, &["stop"])?;
    let took = began.elapsed();

    assert_eq!(stop.status.code(), Some(0), "{}", String::from_utf8_lossy(&stop.stderr));
    assert!(took >= Duration::from_secs(2), "stop took {took:?}");
    assert!(!ws.pid_file().exists());

    let log = fs::read_to_string(ws.path().join("logs/arma3server.log"))?;
    assert!(log.contains("started -name=Altis Life -port=2302"), "log: {log}");
    Ok(())
}

#[cfg(unix)]
#[test]
fn running_server_can_be_stopped_after_its_manifest_breaks() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new(5)?;
    let binary = ws.path().join("arma3/arma3server");
    fs::write(&binary, "#!/bin/sh\nexec sleep 60\n")?;
    fs::set_permissions(&binary, fs::Permissions::from_mode(0o755))?;

    let start = ws.run(A3SDT, &["start"])?;
    assert_eq!(start.status.code(), Some(0), "{}", String::from_utf8_lossy(&start.stderr));
    let pid = fs::read_to_string(ws.pid_file())?;

    let config_path = ws.path().join("a3lt.json");
    let config = fs::read_to_string(&config_path)?;
    let broken: String = config
        .lines()
        .filter(|line| !line.contains("\"basicConfig\""))
        .collect::<Vec<_>>()
        .join("\n");
    assert_ne!(broken, config);
    fs::write(&config_path, broken)?;

    let status = ws.run(A3SDT, &["status"])?;
    assert_eq!(status.status.code(), Some(0), "{}", String::from_utf8_lossy(&status.stderr));
    assert_eq!(
        String::from_utf8_lossy(&status.stdout).trim(),
        format!("running (pid {pid})")
    );

    let restart = ws.run(A3SDT, &["restart"])?;
    assert_eq!(restart.status.code(), Some(78));
    assert_eq!(fs::read_to_string(ws.pid_file())?, pid);

    let stop = ws.run(A3SDT, &["stop"])?;
    assert_eq!(stop.status.code(), Some(0), "{}", String::from_utf8_lossy(&stop.stderr));
    assert!(!ws.pid_file().exists());
    Ok(())
}
