//! Async stream log readers (non-UTF8-safe).
//!
//! The dedicated server can emit non-UTF8 bytes on stdout/stderr. Using
//! `BufReader::lines()` would terminate the reader on invalid UTF-8, so lines
//! are read as bytes and decoded lossily.

use std::fmt;
use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Which of the server's output streams a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

/// Read `stream` to EOF, handing each line (without its line ending) to
/// `on_line`.
pub async fn read_lossy_lines<R, F>(stream: R, mut on_line: F) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(String),
{
    let mut reader = BufReader::new(stream);
    let mut buf: Vec<u8> = Vec::with_capacity(1024);

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }

        // Trim trailing newline(s)
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        on_line(String::from_utf8_lossy(&buf).into_owned());
    }
}

/// Mirror one of the server's streams into the operator log.
///
/// stdout lines are logged at INFO and stderr lines at ERROR, both under the
/// `a3lt::server_output` target. The returned handle completes at EOF.
pub fn spawn_stream_reader(
    stream: impl AsyncRead + Unpin + Send + 'static,
    pid: u32,
    kind: OutputStream,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = read_lossy_lines(stream, |line| match kind {
            OutputStream::Stdout => info!(target: "a3lt::server_output", pid, "{line}"),
            OutputStream::Stderr => error!(target: "a3lt::server_output", pid, "{line}"),
        })
        .await;

        if let Err(e) = result {
            debug!(pid, stream = %kind, error = %e, "log stream reader exiting due to read error");
        }
        debug!(pid, stream = %kind, "log stream reader task exiting");
    })
}
