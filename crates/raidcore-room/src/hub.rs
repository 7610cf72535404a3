//! The room engine. Every client action enters through here.

use std::sync::Arc;

use raidcore_protocol::{Recipient, RoomId, ServerEvent};
use raidcore_transport::ConnectionId;
use tokio::sync::Mutex;

use crate::config::GameConfig;
use crate::registry::RoomRegistry;
use crate::room::{EventSender, RoomState, RoomStatus};
use crate::tick;

/// Routes client actions into rooms and fans the resulting events out.
///
/// Cheap to clone; clones share the registry. Each method takes the
/// registry lock once, applies the whole flow, and queues every
/// outbound event before releasing it, so actions are atomic with
/// respect to each other and to timer ticks.
///
/// No method returns an error. An action that does not apply (unknown
/// room, timer already running, caller not the host) is dropped with a
/// debug log and the client is told nothing, mirroring the browser
/// protocol this serves.
#[derive(Clone)]
pub struct RoomHub {
    registry: Arc<Mutex<RoomRegistry>>,
    config: GameConfig,
}

impl Default for RoomHub {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl RoomHub {
    pub fn new(config: GameConfig) -> Self {
        Self {
            registry: Arc::new(Mutex::new(RoomRegistry::new())),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Puts `conn_id` into `room_id`, creating the room on first join.
    ///
    /// The joiner always learns the authoritative hp, even mid-fight;
    /// everyone learns the new roster. Re-joining is idempotent: the
    /// member keeps its position, the outbound channel is refreshed,
    /// and nobody is told about a "new" player.
    pub async fn join_room(&self, conn_id: ConnectionId, room_id: RoomId, sender: EventSender) {
        let mut registry = self.registry.lock().await;
        let room = registry.get_or_create(&room_id, self.config.max_hp);
        let newly_added = room.add_member(conn_id, sender);

        let mut out: Vec<(Recipient, ServerEvent)> = Vec::new();
        if self.config.host_authoritative && room.host() == Some(conn_id) {
            out.push((Recipient::Member(conn_id), ServerEvent::YouAreHost));
        }
        if newly_added {
            out.push((
                Recipient::AllExcept(conn_id),
                ServerEvent::Notification {
                    message: "A new player joined the room.".to_string(),
                },
            ));
        }
        out.push((
            Recipient::All,
            ServerEvent::PlayersUpdate {
                players: room.member_ids(),
            },
        ));
        out.push((
            Recipient::Member(conn_id),
            ServerEvent::HpUpdate { hp: room.hp() },
        ));
        room.dispatch(out);

        tracing::info!(
            %room_id,
            %conn_id,
            members = room.member_count(),
            rejoined = !newly_added,
            "member joined room"
        );
    }

    /// Starts the round timer.
    ///
    /// Applies only if the room exists, no timer is running, the boss
    /// is still alive, and (in the host-authoritative variant) the
    /// caller is the host. Otherwise the request is dropped.
    pub async fn start_timer(&self, conn_id: ConnectionId, room_id: &RoomId) {
        let mut registry = self.registry.lock().await;
        let Some(room) = registry.get_mut(room_id) else {
            tracing::debug!(%room_id, %conn_id, "start for unknown room, dropped");
            return;
        };
        if room.timer_active() {
            tracing::debug!(%room_id, %conn_id, "start while timer running, dropped");
            return;
        }
        if room.hp() == 0 {
            tracing::debug!(%room_id, %conn_id, "start with boss already down, dropped");
            return;
        }
        if self.config.host_authoritative && room.host() != Some(conn_id) {
            tracing::debug!(%room_id, %conn_id, "start from non-host, dropped");
            return;
        }

        let ticker = tick::spawn_room_tick(Arc::clone(&self.registry), room_id.clone());
        room.start_timer(ticker);
        room.dispatch(vec![
            (Recipient::All, ServerEvent::DisableStartButton),
            (
                Recipient::All,
                ServerEvent::Notification {
                    message: "The timer has started!".to_string(),
                },
            ),
        ]);

        tracing::info!(%room_id, %conn_id, "round timer started");
    }

    /// Applies one attack to the room's boss.
    ///
    /// No identity check: the room existing is the only precondition.
    /// The attack that lands the killing blow stops a running timer,
    /// exactly once.
    pub async fn attack(&self, conn_id: ConnectionId, room_id: &RoomId) {
        let mut registry = self.registry.lock().await;
        let Some(room) = registry.get_mut(room_id) else {
            tracing::debug!(%room_id, %conn_id, "attack for unknown room, dropped");
            return;
        };

        let hp = room.deal_damage(self.config.attack_damage);
        let message = if hp > 0 {
            format!("A player attacked the boss. {hp} HP remaining.")
        } else {
            "The boss has been defeated!".to_string()
        };

        let mut out = vec![
            (Recipient::All, ServerEvent::Attack { message }),
            (Recipient::All, ServerEvent::HpUpdate { hp }),
        ];
        if hp == 0 && room.timer_active() {
            let seconds = room.stop_timer();
            out.push((Recipient::All, ServerEvent::TimerStopped { seconds }));
            if self.config.host_authoritative {
                if let Some(host) = room.host() {
                    out.push((Recipient::Member(host), ServerEvent::ShowResetButton));
                }
            }
            tracing::info!(%room_id, seconds, "boss defeated, timer stopped");
        }
        room.dispatch(out);

        tracing::debug!(%room_id, %conn_id, hp, "attack applied");
    }

    /// Puts the room back to a fresh round: full hp, timer canceled,
    /// clock zeroed.
    ///
    /// Deliberately unauthorized: any connection may reset any room it
    /// can name, host or not. Only the start is host-gated.
    pub async fn reset_game(&self, conn_id: ConnectionId, room_id: &RoomId) {
        let mut registry = self.registry.lock().await;
        let Some(room) = registry.get_mut(room_id) else {
            tracing::debug!(%room_id, %conn_id, "reset for unknown room, dropped");
            return;
        };

        room.reset_round(self.config.max_hp);

        let mut out = vec![
            (Recipient::All, ServerEvent::GameReset),
            (Recipient::All, ServerEvent::HpUpdate { hp: room.hp() }),
        ];
        if self.config.host_authoritative {
            if let Some(host) = room.host() {
                out.push((Recipient::Member(host), ServerEvent::YouAreHost));
            }
        }
        room.dispatch(out);

        tracing::info!(%room_id, %conn_id, "room reset to a fresh round");
    }

    /// Removes `conn_id` from every room it was in.
    ///
    /// Remaining members see the updated roster; the departing
    /// connection is told nothing. Rooms left empty are torn down,
    /// timer first. Unknown connections are a no-op, so the connection
    /// handler may call this unconditionally.
    pub async fn disconnect(&self, conn_id: ConnectionId) {
        let mut registry = self.registry.lock().await;

        let mut departed: Vec<RoomId> = Vec::new();
        for room in registry.rooms_mut() {
            if !room.remove_member(conn_id) {
                continue;
            }
            departed.push(room.room_id().clone());
            if !room.is_empty() {
                room.broadcast(ServerEvent::PlayersUpdate {
                    players: room.member_ids(),
                });
            }
        }

        for room_id in &departed {
            registry.remove_if_empty(room_id);
            tracing::info!(%room_id, %conn_id, "member left room");
        }
    }

    /// Snapshot of one room, if it exists.
    pub async fn status(&self, room_id: &RoomId) -> Option<RoomStatus> {
        self.registry.lock().await.get(room_id).map(RoomState::status)
    }

    /// Number of live rooms.
    pub async fn room_count(&self) -> usize {
        self.registry.lock().await.len()
    }
}
