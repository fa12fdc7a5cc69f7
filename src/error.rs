//! Error taxonomy for the request pipeline.
//!
//! Every component returns its own error type. Only [`ServerError`] is
//! allowed to escape the accept loop; everything else is answered on the
//! connection and forgotten.

use std::io;

use thiserror::Error;

use crate::http::response::StatusCode;

/// Malformed or unreadable request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request line is not `GET /<path>`.
    #[error("bad request")]
    BadRequest,

    /// Receiving the request from the socket failed.
    #[error("failed to read request: {0}")]
    Read(#[source] io::Error),
}

impl RequestError {
    /// True when the client reset the connection while we were reading.
    pub fn is_reset(&self) -> bool {
        matches!(self, RequestError::Read(e) if is_disconnect(e))
    }
}

/// Failure to open or map a static file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found")]
    NotFound,

    #[error("permission denied")]
    Forbidden,

    #[error("I/O error: {0}")]
    Other(#[source] io::Error),
}

impl FileError {
    pub fn status(&self) -> StatusCode {
        match self {
            FileError::NotFound => StatusCode::NotFound,
            FileError::Forbidden => StatusCode::Forbidden,
            FileError::Other(_) => StatusCode::InternalServerError,
        }
    }
}

impl From<io::Error> for FileError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound,
            io::ErrorKind::PermissionDenied => FileError::Forbidden,
            _ => FileError::Other(err),
        }
    }
}

/// Failure to run a program or to collect its output.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The target is missing or not executable by us. Nothing was spawned.
    #[error("program not accessible: {0}")]
    Access(#[source] io::Error),

    /// The pipe could not be created or the program image could not be loaded.
    ///
    /// Reported like a child that exited with `exit_code`: the OS error is
    /// kept for logging only and never picks the response status.
    #[error("failed to spawn program (exit code {exit_code}): {source}")]
    Spawn {
        exit_code: i32,
        #[source]
        source: io::Error,
    },

    /// Reading the child's stdout failed.
    #[error("failed to read program output: {0}")]
    Read(#[source] io::Error),

    /// Waiting for the child failed.
    #[error("failed to wait for program: {0}")]
    Wait(#[source] io::Error),

    /// The child did not exit normally (killed by a signal).
    #[error("program terminated abnormally")]
    Signaled,

    /// The child exited with a non-zero status.
    #[error("program exited with status {0}")]
    Exit(i32),
}

impl ExecutionError {
    /// Exit code half of the `{exit_code, error_code}` pair.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecutionError::Spawn { exit_code, .. } => *exit_code,
            ExecutionError::Exit(code) => *code,
            ExecutionError::Access(_)
            | ExecutionError::Read(_)
            | ExecutionError::Wait(_)
            | ExecutionError::Signaled => -1,
        }
    }

    /// OS error half of the pair; 0 when the failure is not an OS error or
    /// the program failed to start.
    pub fn os_error(&self) -> i32 {
        match self {
            ExecutionError::Access(e) | ExecutionError::Read(e) | ExecutionError::Wait(e) => {
                e.raw_os_error().unwrap_or(0)
            }
            ExecutionError::Spawn { .. } | ExecutionError::Signaled | ExecutionError::Exit(_) => 0,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.os_error() {
            libc::ENOENT => StatusCode::NotFound,
            libc::EACCES => StatusCode::Forbidden,
            _ => StatusCode::InternalServerError,
        }
    }
}

/// Failure to deliver a response.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The client went away; abandon the connection and keep serving.
    #[error("connection reset by peer")]
    Reset(#[source] io::Error),

    #[error("write failed: {0}")]
    Other(#[source] io::Error),
}

impl From<io::Error> for WriteError {
    fn from(err: io::Error) -> Self {
        if is_disconnect(&err) {
            WriteError::Reset(err)
        } else {
            WriteError::Other(err)
        }
    }
}

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("fatal write failure: {0}")]
    Write(#[source] io::Error),
}

impl ServerError {
    /// Underlying OS error code, if any.
    pub fn os_error(&self) -> Option<i32> {
        match self {
            ServerError::Bind { source, .. } => source.raw_os_error(),
            ServerError::Write(e) => e.raw_os_error(),
        }
    }
}

fn is_disconnect(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionAborted
    )
}
