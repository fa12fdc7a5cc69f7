//! Program execution with captured output.
//!
//! A program under `/bin/` is spawned with its stdout connected to a pipe.
//! The request context is passed through four environment variables and the
//! whole of stdout becomes the response body, provided the program exits
//! with status 0.

use std::ffi::{CString, OsStr, OsString};
use std::io;
use std::net::SocketAddr;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::process::Stdio;

use bytes::Bytes;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::BaseDirectory;
use crate::error::ExecutionError;

/// Exit code reported when the program image does not exist.
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit code reported when the program image exists but cannot be run.
pub const EXIT_CANNOT_EXECUTE: i32 = 126;

/// Request-derived environment handed to a spawned program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub request_path: OsString,
    pub server_basedir: OsString,
    pub remote_port: String,
    pub remote_ip: String,
}

impl ExecutionContext {
    pub fn new(resolved: &Path, base: &BaseDirectory, peer: SocketAddr) -> Self {
        Self {
            request_path: resolved.as_os_str().to_owned(),
            server_basedir: base.as_os_str().to_owned(),
            remote_port: peer.port().to_string(),
            remote_ip: peer.ip().to_string(),
        }
    }

    /// The variables in the order they are exported.
    pub fn vars(&self) -> [(&'static str, &OsStr); 4] {
        [
            ("REQUEST_PATH", self.request_path.as_os_str()),
            ("SERVER_BASEDIR", self.server_basedir.as_os_str()),
            ("REMOTE_PORT", OsStr::new(&self.remote_port)),
            ("REMOTE_IP", OsStr::new(&self.remote_ip)),
        ]
    }
}

/// Runs the program at `path` and returns its standard output.
///
/// The program must be executable by the server's user; otherwise nothing is
/// spawned and the access error is returned as-is.
pub async fn execute(path: &Path, ctx: &ExecutionContext) -> Result<Bytes, ExecutionError> {
    check_executable(path).map_err(ExecutionError::Access)?;
    spawn_capture(path, ctx.vars()).await
}

/// Spawns `path` with only itself as `argv[0]`, the given variables added to
/// the inherited environment, and stdout piped back to us.
///
/// Output is read to end-of-stream before the child is waited for. The child
/// is reaped on every path, including read failures.
pub async fn spawn_capture<I, K, V>(path: &Path, env: I) -> Result<Bytes, ExecutionError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut child = Command::new(path)
        .envs(env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecutionError::Spawn {
            exit_code: exec_failure_code(&source),
            source,
        })?;

    let mut output = Vec::new();
    if let Some(mut stdout) = child.stdout.take() {
        if let Err(e) = stdout.read_to_end(&mut output).await {
            drop(stdout);
            if let Err(kill_err) = child.kill().await {
                warn!(error = %kill_err, "Failed to reap program after read error");
            }
            return Err(ExecutionError::Read(e));
        }
    }

    let status = child.wait().await.map_err(ExecutionError::Wait)?;
    debug!(program = %path.display(), %status, bytes = output.len(), "Program finished");

    match status.code() {
        Some(0) => Ok(Bytes::from(output)),
        Some(code) => Err(ExecutionError::Exit(code)),
        None => Err(ExecutionError::Signaled),
    }
}

fn exec_failure_code(err: &io::Error) -> i32 {
    if err.kind() == io::ErrorKind::NotFound {
        EXIT_NOT_FOUND
    } else {
        EXIT_CANNOT_EXECUTE
    }
}

fn check_executable(path: &Path) -> io::Result<()> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // SAFETY: c_path is a valid NUL-terminated string that outlives the call.
    let rc = unsafe { libc::access(c_path.as_ptr(), libc::X_OK) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}
