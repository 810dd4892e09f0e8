use bevy_ecs::bundle::Bundle;
use glam::Vec2;

use crate::constants::{self, EnemyStats};
use crate::systems::{Collider, Enemy, EnemyKind, Invulnerable, Player, PlayerStats, Position};

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub position: Position,
    pub stats: PlayerStats,
    pub collider: Collider,
    pub invulnerable: Invulnerable,
}

impl PlayerBundle {
    pub fn new(stats: PlayerStats) -> Self {
        Self {
            player: Player,
            position: Position(Vec2::ZERO),
            stats,
            collider: Collider {
                radius: constants::player::COLLISION_RADIUS,
            },
            invulnerable: Invulnerable::default(),
        }
    }
}

#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub position: Position,
    pub collider: Collider,
}

impl EnemyBundle {
    /// An enemy of `kind` whose base stats were scaled for the current minute.
    pub fn new(kind: EnemyKind, stats: EnemyStats, position: Vec2) -> Self {
        Self {
            enemy: Enemy {
                kind,
                health: stats.health,
                max_health: stats.health,
                speed: stats.speed,
                damage: stats.damage,
                xp: stats.xp,
            },
            position: Position(position),
            collider: Collider {
                radius: constants::enemy::BODY_RADIUS,
            },
        }
    }
}
