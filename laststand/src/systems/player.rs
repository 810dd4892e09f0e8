use bevy_ecs::{
    event::EventWriter,
    query::With,
    system::{Query, Res, ResMut, Single},
};
use tracing::info;

use crate::constants;
use crate::events::GameEvent;
use crate::systems::{Collider, DeltaTime, Enemy, GameStage, Invulnerable, Player, PlayerInput, PlayerStats, Position};

/// Moves the player along the requested direction and winds down hit immunity.
pub fn player_movement_system(
    dt: Res<DeltaTime>,
    input: Res<PlayerInput>,
    player: Single<(&mut Position, &PlayerStats, &mut Invulnerable), With<Player>>,
) {
    let (mut position, stats, mut invulnerable) = player.into_inner();

    let direction = input.0.normalize_or_zero();
    position.0 += direction * stats.speed * dt.seconds;

    if invulnerable.active() {
        invulnerable.0 = (invulnerable.0 - dt.seconds).max(0.0);
    }
}

/// Applies contact damage from the first touching enemy, then grants a short immunity window.
pub fn contact_damage_system(
    player: Single<(&Position, &Collider, &mut PlayerStats, &mut Invulnerable), With<Player>>,
    enemies: Query<(&Position, &Collider, &Enemy)>,
    mut stage: ResMut<GameStage>,
    mut events: EventWriter<GameEvent>,
) {
    let (player_position, player_collider, mut stats, mut invulnerable) = player.into_inner();
    if invulnerable.active() {
        return;
    }

    for (position, collider, enemy) in enemies.iter() {
        if !enemy.is_alive() || !player_collider.overlaps(player_position.0, collider, position.0) {
            continue;
        }

        let amount = enemy.damage - stats.defense;
        if amount <= 0.0 {
            continue;
        }

        stats.health = (stats.health - amount).max(0.0);
        invulnerable.0 = constants::player::INVULNERABILITY_SECS;
        events.write(GameEvent::PlayerDamaged {
            amount,
            health: stats.health,
        });

        if stats.health <= 0.0 {
            info!(enemy = %enemy.kind, "Chef was overwhelmed");
            *stage = GameStage::Defeat;
            events.write(GameEvent::Defeat);
        }
        break;
    }
}
