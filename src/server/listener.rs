use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use tokio::net::{TcpListener, TcpSocket};
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::ServerError;
use crate::http::connection::Connection;

/// Pending-connection queue length.
pub const BACKLOG: u32 = 5;

pub struct Listener {
    listener: TcpListener,
}

impl Listener {
    /// Binds all IPv4 interfaces on `port`. Port 0 picks a free port.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(port: u16) -> Result<Self, ServerError> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        let bind_err = |source| ServerError::Bind { port, source };

        let socket = TcpSocket::new_v4().map_err(bind_err)?;
        socket.set_reuseaddr(true).map_err(bind_err)?;
        socket.bind(addr).map_err(bind_err)?;
        let listener = socket.listen(BACKLOG).map_err(bind_err)?;

        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts and handles connections one at a time, forever.
    ///
    /// The next connection is not accepted until the current one is closed.
    /// Accept failures are logged and skipped; only a fatal write failure
    /// ends the loop.
    pub async fn accept_loop(&self, settings: &Settings) -> Result<(), ServerError> {
        loop {
            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    continue;
                }
            };
            info!("Accepted connection from {}", peer);

            let mut conn = Connection::new(socket, peer, settings);
            conn.run().await?;
        }
    }
}

/// Binds the configured port and serves until a fatal error.
pub async fn run(settings: &Settings) -> Result<(), ServerError> {
    let listener = Listener::bind(settings.port)?;
    info!(
        "Listening on port {} serving {}",
        settings.port, settings.base_dir
    );

    listener.accept_loop(settings).await
}
