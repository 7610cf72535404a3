//! Core protocol types for Raidcore's wire format.
//!
//! Every type here travels on the wire between a browser client and the
//! server. Events are internally tagged JSON with camelCase tags and
//! fields, so a JavaScript client reads and writes them natively:
//!
//! ```text
//! { "type": "joinRoom", "roomId": "lobby-1" }
//! { "type": "hpUpdate", "hp": 2995 }
//! ```

use std::fmt;

use raidcore_transport::ConnectionId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a room.
///
/// Room ids are chosen by clients (whatever string they type into the
/// "join" box), so this is a thin newtype over `String` rather than a
/// server-allocated number. `#[serde(transparent)]` keeps it a plain
/// JSON string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Creates a `RoomId` from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Recipient — who should receive an event?
// ---------------------------------------------------------------------------

/// Specifies who should receive a server event.
///
/// When the room engine processes an action, it produces a list of
/// `(Recipient, ServerEvent)` pairs. This enum tells the dispatch layer
/// WHERE to deliver each one. It never travels on the wire itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Send to every member of the room.
    All,

    /// Send to one specific member.
    Member(ConnectionId),

    /// Send to everyone EXCEPT the specified member.
    /// Used for "a new player joined" style notifications.
    AllExcept(ConnectionId),
}

// ---------------------------------------------------------------------------
// Client → Server events
// ---------------------------------------------------------------------------

/// Events a client may send.
///
/// Every action names the room it targets; the server holds no implicit
/// "current room" for a connection. Unknown tags fail to decode and are
/// skipped by the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// "Put me in this room" — creates the room on first join.
    JoinRoom { room_id: RoomId },

    /// "Start the round timer." Only honored for the host in the
    /// host-authoritative variant.
    StartTimer { room_id: RoomId },

    /// "Hit the boss."
    Attack { room_id: RoomId },

    /// "Restore the room to a fresh round."
    ResetGame { room_id: RoomId },
}

// ---------------------------------------------------------------------------
// Server → Client events
// ---------------------------------------------------------------------------

/// Events the server may send.
///
/// The tag strings are the contract with the browser client; changing
/// one is a breaking protocol change, which is why the tests below pin
/// them literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Sent once right after the WebSocket is accepted: tells the
    /// client its own connection id, so it can find itself in roster
    /// updates.
    Connected { connection_id: ConnectionId },

    /// Privately marks the receiver as the room's host.
    YouAreHost,

    /// Human-readable status line shown in the client's feed.
    Notification { message: String },

    /// The full ordered roster of the room.
    PlayersUpdate { players: Vec<ConnectionId> },

    /// The authoritative current health pool.
    HpUpdate { hp: u32 },

    /// Tells clients to grey out their start control.
    DisableStartButton,

    /// One tick of the round timer; `seconds` is elapsed time so far.
    Timer { seconds: u64 },

    /// Result line for a single attack (damage dealt or boss defeated).
    Attack { message: String },

    /// The round timer stopped; `seconds` is the final elapsed time.
    TimerStopped { seconds: u64 },

    /// Privately tells the host to reveal the reset control.
    ShowResetButton,

    /// The room was restored to a fresh round.
    GameReset,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The wire format is consumed by a JavaScript client, so these
    //! tests pin the exact JSON shapes: tag strings, camelCase fields,
    //! and transparent ids. A mismatch here means the client silently
    //! ignores the event.

    use super::*;

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_room_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomId::new("lobby-1")).unwrap();
        assert_eq!(json, "\"lobby-1\"");
    }

    #[test]
    fn test_room_id_deserializes_from_plain_string() {
        let id: RoomId = serde_json::from_str("\"lobby-1\"").unwrap();
        assert_eq!(id, RoomId::new("lobby-1"));
    }

    #[test]
    fn test_room_id_display_is_raw_string() {
        assert_eq!(RoomId::new("r7").to_string(), "r7");
    }

    // =====================================================================
    // ClientEvent
    // =====================================================================

    #[test]
    fn test_client_event_join_room_json_format() {
        let event = ClientEvent::JoinRoom {
            room_id: RoomId::new("lobby-1"),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "joinRoom");
        assert_eq!(json["roomId"], "lobby-1");
    }

    #[test]
    fn test_client_event_tags_are_camel_case() {
        let room_id = RoomId::new("r");
        let tags: Vec<String> = [
            ClientEvent::JoinRoom {
                room_id: room_id.clone(),
            },
            ClientEvent::StartTimer {
                room_id: room_id.clone(),
            },
            ClientEvent::Attack {
                room_id: room_id.clone(),
            },
            ClientEvent::ResetGame { room_id },
        ]
        .iter()
        .map(|e| {
            serde_json::to_value(e).unwrap()["type"]
                .as_str()
                .unwrap()
                .to_string()
        })
        .collect();

        assert_eq!(tags, ["joinRoom", "startTimer", "attack", "resetGame"]);
    }

    #[test]
    fn test_client_event_decodes_browser_payload() {
        // Exactly what the web client sends, byte for byte.
        let event: ClientEvent =
            serde_json::from_str(r#"{"type":"attack","roomId":"boss-room"}"#)
                .unwrap();
        assert_eq!(
            event,
            ClientEvent::Attack {
                room_id: RoomId::new("boss-room"),
            }
        );
    }

    #[test]
    fn test_client_event_unknown_tag_fails_to_decode() {
        let result: Result<ClientEvent, _> =
            serde_json::from_str(r#"{"type":"selfDestruct","roomId":"r"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_event_missing_room_id_fails_to_decode() {
        let result: Result<ClientEvent, _> =
            serde_json::from_str(r#"{"type":"joinRoom"}"#);
        assert!(result.is_err());
    }

    // =====================================================================
    // ServerEvent
    // =====================================================================

    #[test]
    fn test_server_event_connected_json_format() {
        let event = ServerEvent::Connected {
            connection_id: ConnectionId::new(42),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "connected");
        assert_eq!(json["connectionId"], 42);
    }

    #[test]
    fn test_server_event_unit_variants_are_bare_tags() {
        // Variants with no payload still serialize as a tagged object.
        for (event, tag) in [
            (ServerEvent::YouAreHost, "youAreHost"),
            (ServerEvent::DisableStartButton, "disableStartButton"),
            (ServerEvent::ShowResetButton, "showResetButton"),
            (ServerEvent::GameReset, "gameReset"),
        ] {
            let json: serde_json::Value =
                serde_json::to_value(&event).unwrap();
            assert_eq!(json, serde_json::json!({ "type": tag }));
        }
    }

    #[test]
    fn test_server_event_players_update_serializes_ids_as_numbers() {
        let event = ServerEvent::PlayersUpdate {
            players: vec![ConnectionId::new(1), ConnectionId::new(2)],
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "playersUpdate");
        assert_eq!(json["players"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_server_event_hp_update_json_format() {
        let event = ServerEvent::HpUpdate { hp: 2995 };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "hpUpdate");
        assert_eq!(json["hp"], 2995);
    }

    #[test]
    fn test_server_event_timer_json_formats() {
        let tick: serde_json::Value =
            serde_json::to_value(ServerEvent::Timer { seconds: 12 }).unwrap();
        assert_eq!(tick["type"], "timer");
        assert_eq!(tick["seconds"], 12);

        let stopped: serde_json::Value =
            serde_json::to_value(ServerEvent::TimerStopped { seconds: 73 })
                .unwrap();
        assert_eq!(stopped["type"], "timerStopped");
        assert_eq!(stopped["seconds"], 73);
    }

    #[test]
    fn test_server_event_message_variants_json_format() {
        let note: serde_json::Value =
            serde_json::to_value(ServerEvent::Notification {
                message: "A new player joined the room.".into(),
            })
            .unwrap();
        assert_eq!(note["type"], "notification");
        assert_eq!(note["message"], "A new player joined the room.");

        let hit: serde_json::Value =
            serde_json::to_value(ServerEvent::Attack {
                message: "The boss has been defeated!".into(),
            })
            .unwrap();
        assert_eq!(hit["type"], "attack");
        assert_eq!(hit["message"], "The boss has been defeated!");
    }

    #[test]
    fn test_server_event_round_trip() {
        let event = ServerEvent::PlayersUpdate {
            players: vec![ConnectionId::new(9)],
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: ServerEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    // =====================================================================
    // Error cases — malformed input
    // =====================================================================

    #[test]
    fn test_decode_garbage_returns_error() {
        let garbage = b"not json at all";
        let result: Result<ClientEvent, _> = serde_json::from_slice(garbage);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_wrong_shape_returns_error() {
        // Valid JSON but no "type" tag.
        let wrong = r#"{"roomId": "r1"}"#;
        let result: Result<ClientEvent, _> = serde_json::from_str(wrong);
        assert!(result.is_err());
    }
}
