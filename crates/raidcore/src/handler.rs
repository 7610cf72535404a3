//! Per-connection handler: greeting, outbound pump, and event routing.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. The flow is:
//!   1. Send `connected` so the client learns its id
//!   2. Spawn the outbound pump for events queued by the room engine
//!   3. Loop: receive frames → decode → hand to the hub
//!
//! Nothing a client sends produces an error reply. Frames that fail to
//! decode and actions that do not apply are dropped where they land.

use std::sync::Arc;

use raidcore_protocol::{ClientEvent, Codec, ServerEvent};
use raidcore_room::RoomHub;
use raidcore_transport::{Connection, ConnectionId, WebSocketConnection};

use crate::server::ServerState;
use crate::RaidcoreError;

/// Drop guard that removes the connection from every room when the
/// handler exits. Cleanup runs even if the handler panics; `Drop` is
/// synchronous, so the async work goes to a fire-and-forget task.
struct DisconnectGuard {
    conn_id: ConnectionId,
    hub: RoomHub,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        let hub = self.hub.clone();
        tokio::spawn(async move {
            hub.disconnect(conn_id).await;
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), RaidcoreError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    // The client learns its identity first; every roster it receives
    // refers to members by these ids.
    let greeting = state.codec.encode(&ServerEvent::Connected {
        connection_id: conn_id,
    })?;
    conn.send(&greeting).await?;

    // Outbound pump: the room engine queues events on this channel and
    // the pump writes them to the socket, so a broadcast never blocks
    // on any one member's connection. The pump ends once every sender
    // clone is gone — the handler's own copy drops on return, the
    // rooms' copies drop during disconnect cleanup.
    let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel::<ServerEvent>();
    let pump_conn = conn.clone();
    let codec = state.codec;
    tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            let bytes = match codec.encode(&event) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::debug!(error = %e, "failed to encode event");
                    continue;
                }
            };
            if pump_conn.send(&bytes).await.is_err() {
                break;
            }
        }
    });

    let _guard = DisconnectGuard {
        conn_id,
        hub: state.hub.clone(),
    };

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "undecodable frame, dropped");
                continue;
            }
        };

        match event {
            ClientEvent::JoinRoom { room_id } => {
                state
                    .hub
                    .join_room(conn_id, room_id, events_tx.clone())
                    .await;
            }
            ClientEvent::StartTimer { room_id } => {
                state.hub.start_timer(conn_id, &room_id).await;
            }
            ClientEvent::Attack { room_id } => {
                state.hub.attack(conn_id, &room_id).await;
            }
            ClientEvent::ResetGame { room_id } => {
                state.hub.reset_game(conn_id, &room_id).await;
            }
        }
    }

    // _guard drops here → room cleanup fires.
    Ok(())
}
