//! The once-per-second round timer.

use std::sync::Arc;
use std::time::Duration;

use raidcore_protocol::{RoomId, ServerEvent};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::registry::RoomRegistry;

/// Interval between round timer broadcasts.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owning handle to a room's tick task.
///
/// Lives inside the room's state; exactly one exists per running
/// timer. Dropping the handle aborts the task, so a removed room can
/// never leak its timer.
#[derive(Debug)]
pub(crate) struct TickHandle {
    task: JoinHandle<()>,
}

impl TickHandle {
    pub(crate) fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns the tick task for `room_id`.
///
/// Once per second the task re-acquires the registry lock, advances
/// the room's clock, and broadcasts a `timer` event. Every path that
/// cancels the task does so while holding that same lock, so an
/// aborted task can never touch a room that has already moved on. If
/// the room itself is gone the task stops on its own.
pub(crate) fn spawn_room_tick(registry: Arc<Mutex<RoomRegistry>>, room_id: RoomId) -> TickHandle {
    let task = tokio::spawn(async move {
        // First fire one full period out; a bare `interval` fires
        // immediately.
        let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            let mut registry = registry.lock().await;
            let Some(room) = registry.get_mut(&room_id) else {
                tracing::debug!(%room_id, "room gone, tick task stopping");
                break;
            };
            let seconds = room.advance_timer();
            room.broadcast(ServerEvent::Timer { seconds });
        }
    });

    TickHandle { task }
}
