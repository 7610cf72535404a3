//! The live-room table.

use std::collections::HashMap;

use raidcore_protocol::RoomId;

use crate::room::RoomState;

/// Maps room ids to live rooms.
///
/// A room is in the table iff it has at least one member: created
/// lazily by [`get_or_create`](Self::get_or_create) on first join and
/// dropped by [`remove_if_empty`](Self::remove_if_empty) once the last
/// member leaves. Looking up an absent room is a normal condition, not
/// an error.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, RoomState>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Returns the room for `room_id`, creating a fresh one (full hp,
    /// no members, no timer) if it does not exist yet.
    pub fn get_or_create(&mut self, room_id: &RoomId, max_hp: u32) -> &mut RoomState {
        self.rooms.entry(room_id.clone()).or_insert_with(|| {
            tracing::info!(%room_id, max_hp, "room created");
            RoomState::new(room_id.clone(), max_hp)
        })
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&RoomState> {
        self.rooms.get(room_id)
    }

    pub fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut RoomState> {
        self.rooms.get_mut(room_id)
    }

    /// Drops the room if it has no members left, canceling its timer
    /// first so no tick task outlives it.
    pub fn remove_if_empty(&mut self, room_id: &RoomId) {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return;
        };
        if !room.is_empty() {
            return;
        }
        room.stop_timer();
        self.rooms.remove(room_id);
        tracing::info!(%room_id, "room emptied and removed");
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All rooms, mutably. Used by the disconnect sweep, which has a
    /// connection id but no room id.
    pub(crate) fn rooms_mut(&mut self) -> impl Iterator<Item = &mut RoomState> {
        self.rooms.values_mut()
    }
}
