use std::collections::HashMap;
use std::f32::consts::TAU;

use bevy_ecs::{
    entity::Entity,
    event::{EventWriter, Events},
    query::{With, Without},
    system::{Commands, Query, Res, ResMut, Single},
};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::trace;

use crate::constants::{self, weapon, WeaponPattern};
use crate::events::{DamageEvent, Slow};
use crate::systems::{AreaEffect, DeltaTime, Enemy, Orbital, Player, PlayerStats, Position, Projectile, Weapon};

/// The closest of `candidates` strictly within `range` of `origin`.
pub fn nearest_enemy(origin: Vec2, range: f32, candidates: impl IntoIterator<Item = (Entity, Vec2)>) -> Option<(Entity, Vec2)> {
    candidates
        .into_iter()
        .map(|(entity, position)| (entity, position, origin.distance(position)))
        .filter(|(_, _, distance)| *distance < range)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(entity, position, _)| (entity, position))
}

/// Centers of `count` pools spread evenly around `origin`.
pub fn zone_centers(origin: Vec2, count: u32, distance: f32) -> impl Iterator<Item = Vec2> {
    (0..count).map(move |i| origin + Vec2::from_angle(TAU * i as f32 / count as f32) * distance)
}

/// Counts down every weapon and fires the ones that are ready.
pub fn weapon_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    player: Single<(&Position, &PlayerStats), With<Player>>,
    mut weapons: Query<(&mut Weapon, Option<&mut Orbital>)>,
    enemies: Query<(Entity, &Position, &Enemy), Without<Player>>,
    mut damage: EventWriter<DamageEvent>,
) {
    let (player_position, stats) = player.into_inner();
    let origin = player_position.0;
    let alive = || {
        enemies
            .iter()
            .filter(|(_, _, enemy)| enemy.is_alive())
            .map(|(entity, position, _)| (entity, position.0))
    };

    for (mut weapon, orbital) in weapons.iter_mut() {
        let weapon_stats = constants::weapon_stats(weapon.kind);
        let amount = weapon.damage * stats.damage_multiplier;
        weapon.cooldown_remaining = (weapon.cooldown_remaining - dt.seconds).max(0.0);

        match weapon_stats.pattern {
            WeaponPattern::Orbit { radius, speed } => {
                let Some(mut orbital) = orbital else {
                    continue;
                };
                orbital.angle = (orbital.angle + speed * dt.seconds).rem_euclid(TAU);
                let scoop = origin + Vec2::from_angle(orbital.angle) * radius;

                orbital.recent_hits.retain(|(_, remaining)| {
                    *remaining -= dt.seconds;
                    *remaining > 0.0
                });

                for (entity, position) in alive() {
                    let already_hit = orbital.recent_hits.iter().any(|(hit, _)| *hit == entity);
                    if already_hit || scoop.distance(position) > weapon::ORBITAL_HIT_RADIUS {
                        continue;
                    }
                    damage.write(DamageEvent {
                        target: entity,
                        amount,
                        slow: None,
                    });
                    orbital.recent_hits.push((entity, weapon_stats.cooldown));
                }
            }
            _ if weapon.cooldown_remaining > 0.0 => {}
            WeaponPattern::Projectile { speed, range, pierce } => {
                // Without a target the weapon stays primed.
                let Some((_, target)) = nearest_enemy(origin, range, alive()) else {
                    continue;
                };
                let velocity = (target - origin).normalize_or_zero() * speed;
                trace!(kind = %weapon.kind, "Firing projectile");
                commands.spawn((
                    Position(origin),
                    Projectile {
                        velocity,
                        damage: amount,
                        pierce,
                        remaining_range: range,
                        hits: SmallVec::new(),
                    },
                ));
                weapon.cooldown_remaining = weapon_stats.cooldown;
            }
            WeaponPattern::Sweep { radius } => {
                for (entity, position) in alive() {
                    if origin.distance(position) <= radius {
                        damage.write(DamageEvent {
                            target: entity,
                            amount,
                            slow: None,
                        });
                    }
                }
                weapon.cooldown_remaining = weapon_stats.cooldown;
            }
            WeaponPattern::Zone {
                radius,
                duration,
                slow,
                count,
                distance,
            } => {
                for center in zone_centers(origin, count, distance) {
                    commands.spawn((
                        Position(center),
                        AreaEffect {
                            radius,
                            damage: amount,
                            slow,
                            remaining: duration,
                            tick_timer: weapon::AREA_TICK_SECS,
                        },
                    ));
                }
                weapon.cooldown_remaining = weapon_stats.cooldown;
            }
        }
    }
}

/// Moves projectiles, lets them hit enemies they have not hit yet, and retires spent or out-of-range ones.
///
/// Damage already dealt this tick counts against an enemy's health, so a projectile is never
/// spent on an enemy that is about to die.
pub fn projectile_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    mut projectiles: Query<(Entity, &mut Position, &mut Projectile), Without<Enemy>>,
    enemies: Query<(Entity, &Position, &Enemy), Without<Projectile>>,
    mut damage: ResMut<Events<DamageEvent>>,
) {
    let mut pending: HashMap<Entity, f32> = HashMap::new();
    for hit in damage.iter_current_update_events() {
        *pending.entry(hit.target).or_default() += hit.amount;
    }

    'projectiles: for (entity, mut position, mut projectile) in projectiles.iter_mut() {
        let step = projectile.velocity * dt.seconds;
        position.0 += step;
        projectile.remaining_range -= step.length();

        for (enemy_entity, enemy_position, enemy) in enemies.iter() {
            let incoming = pending.get(&enemy_entity).copied().unwrap_or(0.0);
            if enemy.health - incoming <= 0.0
                || projectile.hits.contains(&enemy_entity)
                || position.0.distance(enemy_position.0) > weapon::PROJECTILE_HIT_RADIUS
            {
                continue;
            }

            damage.send(DamageEvent {
                target: enemy_entity,
                amount: projectile.damage,
                slow: None,
            });
            *pending.entry(enemy_entity).or_default() += projectile.damage;
            projectile.hits.push(enemy_entity);
            projectile.pierce -= 1;
            if projectile.pierce < 0 {
                commands.entity(entity).despawn();
                continue 'projectiles;
            }
        }

        if projectile.remaining_range <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Ticks lingering areas, damaging everything inside them on each beat until they expire.
pub fn area_effect_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    mut areas: Query<(Entity, &Position, &mut AreaEffect), Without<Enemy>>,
    enemies: Query<(Entity, &Position, &Enemy), Without<AreaEffect>>,
    mut damage: EventWriter<DamageEvent>,
) {
    for (entity, position, mut area) in areas.iter_mut() {
        area.remaining -= dt.seconds;
        area.tick_timer -= dt.seconds;

        if area.tick_timer <= 0.0 {
            area.tick_timer += weapon::AREA_TICK_SECS;
            let slow = area.slow.map(|factor| Slow {
                factor,
                duration: weapon::SLOW_DURATION_SECS,
            });
            for (enemy_entity, enemy_position, enemy) in enemies.iter() {
                if enemy.is_alive() && position.0.distance(enemy_position.0) <= area.radius {
                    damage.write(DamageEvent {
                        target: enemy_entity,
                        amount: area.damage,
                        slow,
                    });
                }
            }
        }

        if area.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
