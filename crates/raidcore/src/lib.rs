//! Raidcore: a realtime boss-raid room server for web games.
//!
//! Browser clients connect over a websocket, name a room, and fight a
//! shared boss together. The server keeps each room's health pool and
//! round timer authoritative and fans every change out to the room.
//!
//! The layers, bottom to top:
//! - [`raidcore_transport`] — websocket listener and connections
//! - [`raidcore_protocol`] — the JSON event vocabulary and codec
//! - [`raidcore_room`] — room lifecycle, boss state, timer, broadcast
//! - this crate — the server loop and per-connection handler
//!
//! ```rust,ignore
//! use raidcore::RaidcoreServer;
//!
//! let server = RaidcoreServer::builder()
//!     .bind("0.0.0.0:3000")
//!     .build()
//!     .await?;
//! server.run().await
//! ```

mod error;
mod handler;
mod server;

pub use error::RaidcoreError;
pub use server::{RaidcoreServer, RaidcoreServerBuilder};

// The pieces callers need alongside the server.
pub use raidcore_protocol::{ClientEvent, JsonCodec, RoomId, ServerEvent};
pub use raidcore_room::{GameConfig, RoomStatus};
pub use raidcore_transport::ConnectionId;
