use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use laststand::{
    events::{DamageEvent, GameEvent, Slow},
    systems::{damage_system, Enemy, EnemyKind, KillCount, Position, Slowed, XpGem},
};
use speculoos::prelude::*;

mod common;

fn hit(world: &mut bevy_ecs::world::World, target: bevy_ecs::entity::Entity, amount: f32, slow: Option<Slow>) {
    world.send_event(DamageEvent { target, amount, slow });
}

#[test]
fn test_damage_reduces_enemy_health() {
    let mut world = common::create_test_world();
    let enemy = common::spawn_enemy(&mut world, EnemyKind::Karen, Vec2::new(50.0, 0.0));
    hit(&mut world, enemy, 25.0, None);

    world.run_system_once(damage_system).expect("System should run successfully");

    assert_that(&world.get::<Enemy>(enemy).unwrap().health).is_equal_to(45.0);
    assert_that(&world.resource::<KillCount>().0).is_equal_to(0);
}

#[test]
fn test_lethal_damage_drops_a_gem_and_counts_a_kill() {
    let mut world = common::create_test_world();
    let enemy = common::spawn_enemy(&mut world, EnemyKind::Karen, Vec2::new(50.0, -20.0));
    hit(&mut world, enemy, 100.0, None);

    world.run_system_once(damage_system).expect("System should run successfully");

    assert_that(&world.get_entity(enemy).is_err()).is_true();
    assert_that(&world.resource::<KillCount>().0).is_equal_to(1);

    let gems: Vec<(Vec2, u32)> = world
        .query::<(&Position, &XpGem)>()
        .iter(&world)
        .map(|(position, gem)| (position.0, gem.value))
        .collect();
    assert_that(&gems).is_equal_to(vec![(Vec2::new(50.0, -20.0), 5)]);

    assert_that(&common::game_events(&mut world)).is_equal_to(vec![GameEvent::EnemyKilled {
        kind: EnemyKind::Karen,
        xp: 5,
    }]);
}

#[test]
fn test_enemy_dies_exactly_once_under_simultaneous_hits() {
    let mut world = common::create_test_world();
    let enemy = common::spawn_enemy(&mut world, EnemyKind::Influencer, Vec2::ZERO);
    hit(&mut world, enemy, 20.0, None);
    hit(&mut world, enemy, 20.0, None);
    hit(&mut world, enemy, 20.0, None);

    world.run_system_once(damage_system).expect("System should run successfully");

    assert_that(&world.resource::<KillCount>().0).is_equal_to(1);
    assert_that(&world.query::<&XpGem>().iter(&world).count()).is_equal_to(1);
}

#[test]
fn test_hits_on_despawned_enemies_are_ignored() {
    let mut world = common::create_test_world();
    let enemy = common::spawn_enemy(&mut world, EnemyKind::Normal, Vec2::ZERO);
    world.despawn(enemy);
    hit(&mut world, enemy, 100.0, None);

    world.run_system_once(damage_system).expect("System should run successfully");

    assert_that(&world.resource::<KillCount>().0).is_equal_to(0);
}

#[test]
fn test_slow_refreshes_instead_of_stacking() {
    let mut world = common::create_test_world();
    let enemy = common::spawn_enemy(&mut world, EnemyKind::FoodCritic, Vec2::ZERO);
    world.entity_mut(enemy).insert(Slowed {
        factor: 0.5,
        remaining: 0.1,
    });
    hit(
        &mut world,
        enemy,
        5.0,
        Some(Slow {
            factor: 0.5,
            duration: 0.5,
        }),
    );

    world.run_system_once(damage_system).expect("System should run successfully");

    assert_that(world.get::<Slowed>(enemy).unwrap()).is_equal_to(&Slowed {
        factor: 0.5,
        remaining: 0.5,
    });
}
