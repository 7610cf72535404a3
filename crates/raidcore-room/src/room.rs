//! A single room: the shared boss, the roster, and the broadcast group.

use std::collections::HashMap;

use raidcore_protocol::{Recipient, RoomId, ServerEvent};
use raidcore_transport::ConnectionId;
use tokio::sync::mpsc;

use crate::roster::Roster;
use crate::tick::TickHandle;

/// Outbound channel for delivering events to one member's connection.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Point-in-time snapshot of a room, for inspection and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomStatus {
    pub room_id: RoomId,
    pub hp: u32,
    pub members: Vec<ConnectionId>,
    pub timer_active: bool,
    pub elapsed_seconds: u64,
}

/// One live room.
///
/// A room exists for exactly as long as it has members. All mutation
/// happens under the registry lock, so the methods here are plain
/// synchronous state changes; delivery is a non-blocking channel send
/// that silently drops when a member's receiver is already gone.
pub struct RoomState {
    room_id: RoomId,
    hp: u32,
    members: Roster,
    senders: HashMap<ConnectionId, EventSender>,
    ticker: Option<TickHandle>,
    elapsed_seconds: u64,
}

impl RoomState {
    pub(crate) fn new(room_id: RoomId, max_hp: u32) -> Self {
        Self {
            room_id,
            hp: max_hp,
            members: Roster::new(),
            senders: HashMap::new(),
            ticker: None,
            elapsed_seconds: 0,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn host(&self) -> Option<ConnectionId> {
        self.members.host()
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.to_vec()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, conn_id: ConnectionId) -> bool {
        self.members.contains(conn_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn timer_active(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Adds a member and registers its outbound channel. Re-adding an
    /// existing member keeps its roster position and swaps in the new
    /// channel. Returns `true` if the member is new.
    pub(crate) fn add_member(&mut self, conn_id: ConnectionId, sender: EventSender) -> bool {
        let added = self.members.insert(conn_id);
        self.senders.insert(conn_id, sender);
        added
    }

    /// Removes a member and its channel. Returns `false` if absent.
    pub(crate) fn remove_member(&mut self, conn_id: ConnectionId) -> bool {
        let removed = self.members.remove(conn_id);
        if removed {
            self.senders.remove(&conn_id);
        }
        removed
    }

    /// Applies one attack, clamping at zero. Returns the new hp.
    pub(crate) fn deal_damage(&mut self, damage: u32) -> u32 {
        self.hp = self.hp.saturating_sub(damage);
        self.hp
    }

    /// Advances the round clock by one second. Returns the new value.
    pub(crate) fn advance_timer(&mut self) -> u64 {
        self.elapsed_seconds += 1;
        self.elapsed_seconds
    }

    /// Begins a round: clock back to zero, tick task installed.
    pub(crate) fn start_timer(&mut self, ticker: TickHandle) {
        self.elapsed_seconds = 0;
        self.ticker = Some(ticker);
    }

    /// Cancels the round timer and zeroes the clock, returning the
    /// final elapsed value. Idempotent: with no timer running this
    /// returns whatever the clock read (zero after a prior stop).
    pub(crate) fn stop_timer(&mut self) -> u64 {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        std::mem::take(&mut self.elapsed_seconds)
    }

    /// Puts the room back to a fresh round: timer canceled, clock
    /// zeroed, boss back to full health.
    pub(crate) fn reset_round(&mut self, max_hp: u32) {
        self.stop_timer();
        self.hp = max_hp;
    }

    /// Delivers one event to one member. Drops silently if the member
    /// is not here or its receiver is gone (mid-disconnect).
    pub(crate) fn send_to(&self, conn_id: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&conn_id) {
            let _ = sender.send(event);
        }
    }

    /// Delivers one event to every member.
    pub(crate) fn broadcast(&self, event: ServerEvent) {
        for conn_id in self.members.iter() {
            self.send_to(conn_id, event.clone());
        }
    }

    /// Delivers a batch of addressed events, in order.
    pub(crate) fn dispatch(&self, events: Vec<(Recipient, ServerEvent)>) {
        for (recipient, event) in events {
            match recipient {
                Recipient::All => self.broadcast(event),
                Recipient::Member(conn_id) => self.send_to(conn_id, event),
                Recipient::AllExcept(excluded) => {
                    for conn_id in self.members.iter() {
                        if conn_id != excluded {
                            self.send_to(conn_id, event.clone());
                        }
                    }
                }
            }
        }
    }

    pub fn status(&self) -> RoomStatus {
        RoomStatus {
            room_id: self.room_id.clone(),
            hp: self.hp,
            members: self.member_ids(),
            timer_active: self.timer_active(),
            elapsed_seconds: self.elapsed_seconds,
        }
    }
}
