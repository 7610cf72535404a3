//! `RaidcoreServer` builder and accept loop.
//!
//! This is the entry point for running a Raidcore server. It ties the
//! layers together: transport → protocol → room engine.

use std::sync::Arc;

use raidcore_protocol::JsonCodec;
use raidcore_room::{GameConfig, RoomHub};
use raidcore_transport::{Transport, WebSocketTransport};

use crate::handler::handle_connection;
use crate::RaidcoreError;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The hub
/// carries its own interior locking; nothing here needs a mutex.
pub(crate) struct ServerState {
    pub(crate) hub: RoomHub,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Raidcore server.
///
/// # Example
///
/// ```rust,ignore
/// use raidcore::RaidcoreServer;
///
/// let server = RaidcoreServer::builder()
///     .bind("0.0.0.0:3000")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct RaidcoreServerBuilder {
    bind_addr: String,
    allowed_origin: Option<String>,
    game: GameConfig,
}

impl RaidcoreServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            allowed_origin: None,
            game: GameConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Restricts websocket handshakes to browsers sending this
    /// `Origin` header. Without it any origin is accepted.
    pub fn allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = Some(origin.into());
        self
    }

    /// Sets the game configuration for every room.
    pub fn game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Builds the server: binds the listener and prepares shared state.
    pub async fn build(self) -> Result<RaidcoreServer, RaidcoreError> {
        let mut transport = WebSocketTransport::bind(&self.bind_addr).await?;
        if let Some(origin) = self.allowed_origin {
            transport = transport.with_allowed_origin(origin);
        }

        let state = Arc::new(ServerState {
            hub: RoomHub::new(self.game),
            codec: JsonCodec,
        });

        Ok(RaidcoreServer { transport, state })
    }
}

impl Default for RaidcoreServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Raidcore server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct RaidcoreServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl RaidcoreServer {
    /// Creates a new builder.
    pub fn builder() -> RaidcoreServerBuilder {
        RaidcoreServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each
    /// one. Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), RaidcoreError> {
        tracing::info!("Raidcore server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
