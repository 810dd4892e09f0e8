use bevy_ecs::{
    event::{EventReader, EventWriter},
    system::{Commands, Query, ResMut},
};
use tracing::debug;

use crate::events::{DamageEvent, GameEvent};
use crate::systems::{Enemy, KillCount, Position, Slowed, XpGem};

/// Applies this tick's weapon hits. An enemy dies exactly once: it drops a gem worth its XP and counts as a kill.
pub fn damage_system(
    mut commands: Commands,
    mut hits: EventReader<DamageEvent>,
    mut enemies: Query<(&Position, &mut Enemy)>,
    mut kills: ResMut<KillCount>,
    mut events: EventWriter<GameEvent>,
) {
    for hit in hits.read() {
        let Ok((position, mut enemy)) = enemies.get_mut(hit.target) else {
            continue;
        };
        if !enemy.is_alive() {
            continue;
        }

        enemy.health -= hit.amount;
        if let Some(slow) = hit.slow {
            commands.entity(hit.target).insert(Slowed {
                factor: slow.factor,
                remaining: slow.duration,
            });
        }

        if !enemy.is_alive() {
            debug!(kind = %enemy.kind, xp = enemy.xp, "Enemy defeated");
            kills.0 += 1;
            commands.spawn((Position(position.0), XpGem { value: enemy.xp }));
            commands.entity(hit.target).despawn();
            events.write(GameEvent::EnemyKilled {
                kind: enemy.kind,
                xp: enemy.xp,
            });
        }
    }
}
