//! Room lifecycle and broadcast engine.
//!
//! This crate holds the whole game: rooms keyed by client-chosen ids,
//! a shared boss health pool per room, the host role derived from join
//! order, and the once-per-second round timer. [`RoomHub`] is the
//! entry point; the connection layer hands it decoded client events
//! and an outbound channel per member, and the hub fans server events
//! back out through those channels.
//!
//! The engine is deliberately error-free at its surface: requests that
//! do not apply are dropped silently, exactly as the browser protocol
//! expects. Consistency comes from a single registry lock held across
//! each action, including every timer tick.

mod config;
mod hub;
mod registry;
mod room;
mod roster;
mod tick;

pub use config::GameConfig;
pub use hub::RoomHub;
pub use registry::RoomRegistry;
pub use room::{EventSender, RoomState, RoomStatus};
pub use roster::Roster;
pub use tick::TICK_PERIOD;
