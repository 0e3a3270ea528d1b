//! [`ProcessControl`] backed by the operating system.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::process::Stdio;

use a3lt_core::ports::{
    LaunchCommand, ProcessControl, ServerExit, ServerOutput, ShutdownSignal, SignalDelivery,
    SpawnedServer,
};
use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::debug;

use super::signal::send_signal;
use super::stream::{OutputStream, spawn_stream_reader};
use crate::pidfile::pid_exists;

/// Width of the separator written before each detached run's output.
const BANNER_WIDTH: usize = 80;

/// Spawns real processes with `tokio::process` and signals them with
/// `kill(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessControl;

impl SystemProcessControl {
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessControl for SystemProcessControl {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<SpawnedServer> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .current_dir(&command.working_directory)
            .stdin(Stdio::null());

        match &command.output {
            ServerOutput::LogFile(path) => {
                let log = open_server_log(path)?;
                cmd.stdout(Stdio::from(log.try_clone()?))
                    .stderr(Stdio::from(log));
                // Keep the terminal's Ctrl-C away from a server we do not wait on.
                #[cfg(unix)]
                cmd.process_group(0);
            }
            ServerOutput::Mirror => {
                cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
            }
        }

        debug!(program = %command.program.display(), args = ?command.args, "Spawning server");
        let mut child = cmd.spawn()?;
        let pid = child
            .id()
            .ok_or_else(|| io::Error::other("spawned server exited before reporting a PID"))?;

        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_stream_reader(stdout, pid, OutputStream::Stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_stream_reader(stderr, pid, OutputStream::Stderr));
        }

        Ok(SpawnedServer {
            pid,
            exit: Box::new(ChildExit { child, readers }),
        })
    }

    fn is_alive(&self, pid: u32) -> bool {
        pid_exists(pid)
    }

    fn signal(&self, pid: u32, signal: ShutdownSignal) -> io::Result<SignalDelivery> {
        send_signal(pid, signal)
    }
}

/// Open the server log for appending and write the run separator.
fn open_server_log(path: &Path) -> io::Result<File> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "\n\n{}", "-".repeat(BANNER_WIDTH))?;
    file.flush()?;
    Ok(file)
}

struct ChildExit {
    child: Child,
    readers: Vec<JoinHandle<()>>,
}

#[async_trait]
impl ServerExit for ChildExit {
    async fn wait(mut self: Box<Self>) -> io::Result<Option<i32>> {
        let status = self.child.wait().await?;
        // Drain whatever the server wrote before exiting.
        for reader in self.readers.drain(..) {
            let _ = reader.await;
        }
        Ok(status.code())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sh(script: &str, dir: &Path, output: ServerOutput) -> LaunchCommand {
        LaunchCommand {
            program: "/bin/sh".into(),
            args: vec!["-c".to_string(), script.to_string()],
            working_directory: dir.to_path_buf(),
            output,
        }
    }

    #[tokio::test]
    async fn log_file_output_appends_after_banner() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("arma3server.log");
        fs::write(&log, "previous run\n").unwrap();

        let control = SystemProcessControl::new();
        let spawned = control
            .spawn(&sh("echo hello; echo oops >&2", dir.path(), ServerOutput::LogFile(log.clone())))
            .unwrap();
        assert_eq!(spawned.exit.wait().await.unwrap(), Some(0));

        let content = fs::read_to_string(&log).unwrap();
        let banner = format!("previous run\n\n\n{}\n", "-".repeat(80));
        assert!(content.starts_with(&banner), "unexpected log: {content:?}");
        assert!(content.contains("hello\n"));
        assert!(content.contains("oops\n"));
    }

    #[tokio::test]
    async fn working_directory_is_the_server_root() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("out.log");

        let control = SystemProcessControl::new();
        let spawned = control
            .spawn(&sh("pwd", dir.path(), ServerOutput::LogFile(log.clone())))
            .unwrap();
        spawned.exit.wait().await.unwrap();

        let expected = dir.path().canonicalize().unwrap();
        let content = fs::read_to_string(&log).unwrap();
        assert!(content.contains(&*expected.to_string_lossy()));
    }

    #[tokio::test]
    async fn mirrored_server_reports_exit_code() {
        let dir = TempDir::new().unwrap();
        let control = SystemProcessControl::new();

        let spawned = control
            .spawn(&sh("echo up; exit 3", dir.path(), ServerOutput::Mirror))
            .unwrap();

        assert!(spawned.pid > 0);
        assert_eq!(spawned.exit.wait().await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn missing_program_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut command = sh("", dir.path(), ServerOutput::Mirror);
        command.program = dir.path().join("arma3server");

        let err = SystemProcessControl::new().spawn(&command).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
