use bevy_ecs::{
    entity::Entity,
    query::{With, Without},
    system::{Commands, Query, Res, Single},
};

use crate::systems::{DeltaTime, Enemy, Player, Position, Slowed};

/// Every enemy walks straight at the player; slowed enemies walk at a fraction of their speed.
pub fn enemy_movement_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    player: Single<&Position, With<Player>>,
    mut enemies: Query<(Entity, &mut Position, &Enemy, Option<&mut Slowed>), Without<Player>>,
) {
    let target = player.0;

    for (entity, mut position, enemy, slowed) in enemies.iter_mut() {
        let mut speed = enemy.speed;
        if let Some(mut slowed) = slowed {
            speed *= slowed.factor;
            slowed.remaining -= dt.seconds;
            if slowed.remaining <= 0.0 {
                commands.entity(entity).remove::<Slowed>();
            }
        }

        let direction = (target - position.0).normalize_or_zero();
        position.0 += direction * speed * dt.seconds;
    }
}
