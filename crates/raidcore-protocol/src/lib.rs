//! Wire protocol for Raidcore.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`RoomId`],
//!   [`Recipient`]) — the events that travel on the wire and the
//!   addressing used to fan them out.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how events are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and the room
//! engine (game state). It doesn't know about connections or rooms — it
//! only knows how to serialize and deserialize events.
//!
//! ```text
//! Transport (bytes) → Protocol (events) → Room engine (state)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientEvent, Recipient, RoomId, ServerEvent};
