// Subprocess runner implementation
// reason: async-trait, tokio for async process management
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

use kernver_core::port::{CommandRunner, CommandSpec, FirstLineOutput, QueryError};

/// Upper bound on the bytes buffered for the first line
pub const MAX_FIRST_LINE_BYTES: u64 = 4096;

/// Subprocess runner
/// Spawns the command directly from its argv; no shell, no env or cwd overrides
#[derive(Debug, Default, Clone, Copy)]
pub struct SubprocessRunner;

impl SubprocessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Spawn child, read one line, then reap it
    async fn spawn_and_read(&self, command: &CommandSpec) -> Result<FirstLineOutput, QueryError> {
        // kill_on_drop: an abandoned call (timeout, cancel, read error) must not leak the child
        let mut child = Command::new(command.program)
            .args(command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| QueryError::SpawnFailed(describe_io_error(&e)))?;

        debug!(command = %command, pid = ?child.id(), "Spawned child process");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| QueryError::StreamRead("stdout was not captured".to_string()))?;

        // stdout is consumed here and closed before the wait
        let first_line = read_first_line(stdout)
            .await
            .map_err(|e| QueryError::StreamRead(describe_io_error(&e)))?;

        let status = child
            .wait()
            .await
            .map_err(|e| QueryError::InterruptedWait(describe_io_error(&e)))?;

        Ok(FirstLineOutput {
            first_line,
            exit_code: exit_code_of(status),
        })
    }
}

#[async_trait]
impl CommandRunner for SubprocessRunner {
    async fn run_first_line(&self, command: &CommandSpec) -> Result<FirstLineOutput, QueryError> {
        self.spawn_and_read(command).await
    }
}

/// Read the first line of `stream`
///
/// Returns `None` at EOF. The terminator (`\n`, `\r\n` or a bare `\r`) is
/// stripped and the bytes are decoded lossily as UTF-8. A line longer than
/// [`MAX_FIRST_LINE_BYTES`] is cut at the cap.
pub(crate) async fn read_first_line<R>(stream: R) -> std::io::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream.take(MAX_FIRST_LINE_BYTES));
    let mut buf = Vec::new();

    if reader.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if let Some(cr) = buf.iter().position(|b| *b == b'\r') {
        buf.truncate(cr);
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Numeric exit code; on unix a signal death maps to `128 + signal`
fn exit_code_of(status: ExitStatus) -> Option<i32> {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        status.code().or_else(|| status.signal().map(|sig| 128 + sig))
    }

    #[cfg(not(unix))]
    {
        status.code()
    }
}

/// OS error text without the `(os error N)` suffix
fn describe_io_error(err: &std::io::Error) -> String {
    #[cfg(unix)]
    {
        if let Some(code) = err.raw_os_error() {
            return nix::errno::Errno::from_raw(code).desc().to_string();
        }
    }

    err.to_string()
}
