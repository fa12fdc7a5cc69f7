use std::net::SocketAddr;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, error, warn};

use crate::config::Settings;
use crate::error::{RequestError, ServerError, WriteError};
use crate::exec::{self, ExecutionContext};
use crate::files;
use crate::http::parser::parse_request;
use crate::http::request::Request;
use crate::http::response::{Body, Response};
use crate::http::writer::ResponseWriter;
use crate::router::{self, Target, TargetKind};

/// One accepted connection, handled from request to close.
///
/// The stream is dropped (and so closed) together with the connection.
pub struct Connection<'a, S> {
    stream: S,
    peer: SocketAddr,
    settings: &'a Settings,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Routing(Request),
    Serving(Target),
    Executing(Target),
    Responding(ResponseWriter),
    Closed,
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, settings: &'a Settings) -> Self {
        Self {
            stream,
            peer,
            settings,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to [`ConnectionState::Closed`].
    ///
    /// Every per-request failure is answered or logged here. Only a write
    /// failure that is not a client disconnect escapes, and only when the
    /// settings ask for it.
    pub async fn run(&mut self) -> Result<(), ServerError> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(Some(buf)) => match parse_request(&buf) {
                            Ok(req) => ConnectionState::Routing(req),
                            Err(e) => {
                                warn!(peer = %self.peer, "Rejected request: {}", e);
                                Self::respond(Response::bad_request())
                            }
                        },
                        Ok(None) => {
                            debug!(peer = %self.peer, "Client closed before sending a request");
                            ConnectionState::Closed
                        }
                        Err(e) if e.is_reset() => {
                            warn!(peer = %self.peer, "Connection reset by client");
                            ConnectionState::Closed
                        }
                        Err(e) => {
                            error!(peer = %self.peer, "{}", e);
                            ConnectionState::Closed
                        }
                    };
                }

                ConnectionState::Routing(req) => {
                    let target = router::route(&req.path, &self.settings.base_dir);
                    debug!(path = %target.path.display(), kind = ?target.kind, "Resolved request");

                    self.state = match target.kind {
                        TargetKind::Executable => ConnectionState::Executing(target),
                        TargetKind::Static => ConnectionState::Serving(target),
                    };
                }

                ConnectionState::Serving(target) => {
                    let response = match files::serve(&target.path) {
                        Ok(content) => Response::ok(Body::Mapped(content)),
                        Err(e) => {
                            warn!(path = %target.path.display(), "Cannot serve file: {}", e);
                            Response::error(e.status())
                        }
                    };
                    self.state = Self::respond(response);
                }

                ConnectionState::Executing(target) => {
                    let ctx = ExecutionContext::new(&target.path, &self.settings.base_dir, self.peer);

                    let response = match exec::execute(&target.path, &ctx).await {
                        Ok(output) => Response::ok(Body::Captured(output)),
                        Err(e) => {
                            warn!(
                                program = %target.path.display(),
                                exit_code = e.exit_code(),
                                os_error = e.os_error(),
                                "Program failed: {}",
                                e
                            );
                            Response::error(e.status())
                        }
                    };
                    self.state = Self::respond(response);
                }

                ConnectionState::Responding(mut writer) => {
                    match writer.write_to_stream(&mut self.stream).await {
                        Ok(sent) => {
                            debug!(peer = %self.peer, bytes = sent, "Response sent");
                        }
                        Err(WriteError::Reset(_)) => {
                            warn!(peer = %self.peer, "Client went away before the response was sent");
                        }
                        Err(WriteError::Other(e)) => {
                            if self.settings.abort_on_write_error {
                                error!(peer = %self.peer, "Fatal write failure: {}", e);
                                return Err(ServerError::Write(e));
                            }
                            error!(peer = %self.peer, "Write failure: {}", e);
                        }
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        debug!(peer = %self.peer, "Connection closed");
        Ok(())
    }

    /// Reads the request with a single receive.
    ///
    /// Returns `None` when the client closed without sending anything.
    pub async fn read_request(&mut self) -> Result<Option<Vec<u8>>, RequestError> {
        let mut buf = vec![0u8; self.settings.max_request_size];
        let n = self.stream.read(&mut buf).await.map_err(RequestError::Read)?;

        if n == 0 {
            return Ok(None);
        }

        buf.truncate(n);
        Ok(Some(buf))
    }

    fn respond(response: Response) -> ConnectionState {
        let status = response.status.as_u16();
        let writer = ResponseWriter::new(response);
        debug!(status, bytes = writer.total_len(), "Responding");
        ConnectionState::Responding(writer)
    }
}
