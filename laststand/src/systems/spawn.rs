use std::f32::consts::TAU;

use bevy_ecs::{
    event::EventWriter,
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut, Single},
};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, info};

use crate::constants::{self, enemy, EnemyStats};
use crate::events::GameEvent;
use crate::systems::{DeltaTime, Enemy, EnemyBundle, EnemyKind, GameRng, Player, Position, RunClock};

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    pub elapsed: f32,
    /// Minute mark at which the next boss arrives.
    pub next_boss_minute: u32,
}

impl Default for SpawnTimer {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            next_boss_minute: enemy::BOSS_INTERVAL_MINUTES,
        }
    }
}

impl SpawnTimer {
    /// A resumed run owes no boss for minute marks it already passed.
    pub fn resumed_at(minutes: u32) -> Self {
        let interval = enemy::BOSS_INTERVAL_MINUTES;
        Self {
            elapsed: 0.0,
            next_boss_minute: (minutes / interval).saturating_add(1).saturating_mul(interval),
        }
    }
}

/// Seconds between spawns once `minutes` have passed.
pub fn spawn_interval(minutes: f32) -> f32 {
    enemy::SPAWN_INTERVAL_SECS * constants::scaling(enemy::SPAWN_RATE_SCALING, minutes)
}

/// Picks an enemy type from a uniform `roll` in `[0, 1)`; later minutes unlock tougher kinds.
pub fn choose_enemy_kind(minutes: f32, roll: f32) -> EnemyKind {
    // (food critic, karen, hungry, influencer) cutoffs, checked in that order
    let cutoffs: [f32; 4] = if minutes > 15.0 {
        [0.25, 0.45, 0.65, 0.85]
    } else if minutes > 8.0 {
        [0.15, 0.40, 0.65, 0.85]
    } else if minutes > 3.0 {
        [0.0, 0.25, 0.50, 0.75]
    } else if minutes > 1.0 {
        [0.0, 0.0, 0.40, 0.70]
    } else {
        return EnemyKind::Normal;
    };
    let kinds = [
        EnemyKind::FoodCritic,
        EnemyKind::Karen,
        EnemyKind::Hungry,
        EnemyKind::Influencer,
    ];

    kinds
        .into_iter()
        .zip(cutoffs)
        .find(|(_, cutoff)| roll < *cutoff)
        .map_or(EnemyKind::Normal, |(kind, _)| kind)
}

/// Base stats for `kind`, scaled for `minutes` of play.
pub fn scaled_stats(kind: EnemyKind, minutes: f32) -> EnemyStats {
    let base = constants::enemy_stats(kind);
    EnemyStats {
        health: (base.health * constants::scaling(enemy::HEALTH_SCALING, minutes)).floor(),
        speed: (base.speed * constants::scaling(enemy::SPEED_SCALING, minutes)).floor(),
        damage: (base.damage * constants::scaling(enemy::DAMAGE_SCALING, minutes)).floor(),
        xp: base.xp,
    }
}

fn spawn_point(rng: &mut GameRng, around: Vec2) -> Vec2 {
    let angle = rng.0.random_range(0.0..TAU);
    around + Vec2::from_angle(angle) * enemy::SPAWN_DISTANCE
}

/// Spawns the regular enemy stream on a shrinking interval, plus a boss at every boss minute mark.
pub fn spawn_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    clock: Res<RunClock>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<GameRng>,
    player: Single<&Position, With<Player>>,
    enemies: Query<(), With<Enemy>>,
    mut events: EventWriter<GameEvent>,
) {
    let minutes = clock.minutes();
    let center = player.0;

    let mark = clock.whole_minutes();
    if mark >= timer.next_boss_minute {
        let stats = scaled_stats(EnemyKind::Boss, minutes);
        info!(minute = mark, health = stats.health, "Boss entered the kitchen");
        commands.spawn(EnemyBundle::new(EnemyKind::Boss, stats, spawn_point(&mut rng, center)));
        events.write(GameEvent::BossSpawned { minute: mark });
        timer.next_boss_minute = timer.next_boss_minute.saturating_add(enemy::BOSS_INTERVAL_MINUTES);
    }

    timer.elapsed += dt.seconds;
    if timer.elapsed < spawn_interval(minutes) {
        return;
    }
    timer.elapsed = 0.0;

    if enemies.iter().count() >= enemy::MAX_ALIVE {
        return;
    }

    let roll: f32 = rng.0.random();
    let kind = choose_enemy_kind(minutes, roll);
    let position = spawn_point(&mut rng, center);
    debug!(%kind, minute = minutes, "Spawning enemy");
    commands.spawn(EnemyBundle::new(kind, scaled_stats(kind, minutes), position));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_only_normal_enemies_in_the_first_minute() {
        for roll in [0.0, 0.1, 0.5, 0.99] {
            assert_eq!(choose_enemy_kind(0.0, roll), EnemyKind::Normal);
            assert_eq!(choose_enemy_kind(1.0, roll), EnemyKind::Normal);
        }
    }

    #[test]
    fn test_variety_arrives_partway_through_the_second_minute() {
        assert_eq!(choose_enemy_kind(1.5, 0.1), EnemyKind::Hungry);
        assert_eq!(choose_enemy_kind(1.5, 0.5), EnemyKind::Influencer);
    }

    #[test]
    fn test_enemy_table_cutoffs() {
        assert_eq!(choose_enemy_kind(2.0, 0.39), EnemyKind::Hungry);
        assert_eq!(choose_enemy_kind(2.0, 0.40), EnemyKind::Influencer);
        assert_eq!(choose_enemy_kind(2.0, 0.70), EnemyKind::Normal);
        assert_eq!(choose_enemy_kind(3.0, 0.0), EnemyKind::Hungry);

        assert_eq!(choose_enemy_kind(3.2, 0.0), EnemyKind::Karen);
        assert_eq!(choose_enemy_kind(8.0, 0.74), EnemyKind::Influencer);

        assert_eq!(choose_enemy_kind(8.5, 0.1), EnemyKind::FoodCritic);
        assert_eq!(choose_enemy_kind(15.0, 0.86), EnemyKind::Normal);

        assert_eq!(choose_enemy_kind(15.1, 0.24), EnemyKind::FoodCritic);
        assert_eq!(choose_enemy_kind(15.1, 0.44), EnemyKind::Karen);
        assert_eq!(choose_enemy_kind(29.0, 0.64), EnemyKind::Hungry);
    }

    #[test]
    fn test_scaled_stats_floor_and_keep_xp() {
        let stats = scaled_stats(EnemyKind::Normal, 1.0);
        assert_eq!(stats.health, 32.0); // 30 * 1.08 = 32.4
        assert_eq!(stats.damage, 12.0); // 12 * 1.05 = 12.6
        assert_eq!(stats.speed, 61.0); // 60 * 1.03 = 61.8
        assert_eq!(stats.xp, 1);

        // 30 * 1.08^2.5 = 36.36
        assert_eq!(scaled_stats(EnemyKind::Normal, 2.5).health, 36.0);
    }

    #[test]
    fn test_spawn_interval_shrinks_continuously() {
        assert_eq!(spawn_interval(0.0), enemy::SPAWN_INTERVAL_SECS);
        assert!(spawn_interval(9.5) < spawn_interval(9.0));
    }

    #[test]
    fn test_resumed_timer_skips_passed_boss_marks() {
        assert_eq!(SpawnTimer::resumed_at(0).next_boss_minute, 5);
        assert_eq!(SpawnTimer::resumed_at(5).next_boss_minute, 10);
        assert_eq!(SpawnTimer::resumed_at(12).next_boss_minute, 15);
        assert_eq!(SpawnTimer::resumed_at(u32::MAX).next_boss_minute, u32::MAX);
    }
}
