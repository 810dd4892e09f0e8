use bevy_ecs::prelude::*;

use crate::systems::EnemyKind;

/// Notable things that happened during a tick, surfaced to whoever drives the game.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    EnemyKilled { kind: EnemyKind, xp: u32 },
    BossSpawned { minute: u32 },
    LevelUp { level: u32 },
    PlayerDamaged { amount: f32, health: f32 },
    /// Emitted on every autosave boundary; the driver decides where the snapshot goes.
    AutoSave { game_timer: u64 },
    Victory,
    Defeat,
}

/// Slow applied alongside a hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slow {
    pub factor: f32,
    pub duration: f32,
}

/// A weapon hit on an enemy, resolved later in the same tick.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: f32,
    pub slow: Option<Slow>,
}
