//! Game tunables shared by every room the server creates.

/// Configuration for the boss fight every room runs.
///
/// The defaults match the browser game this engine serves: a 3000 HP
/// boss losing 5 HP per attack, with start authority held by the host.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Health the boss starts with, and is restored to on reset.
    pub max_hp: u32,
    /// Damage a single attack deals.
    pub attack_damage: u32,
    /// When true, only the host (earliest member) may start the round
    /// timer, and host-only signals are emitted. When false the room
    /// runs peer-to-peer: anyone may start, and no host signals exist.
    pub host_authoritative: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_hp: 3000,
            attack_damage: 5,
            host_authoritative: true,
        }
    }
}
