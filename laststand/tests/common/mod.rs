#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::Events, world::World};
use glam::Vec2;
use laststand::{
    constants,
    events::{DamageEvent, GameEvent},
    save::SelectedCharacter,
    systems::{
        DeltaTime, EnemyBundle, EnemyKind, Experience, GameRng, GameStage, KillCount, PlayerBundle, PlayerInput, PlayerStats,
        Position, RunClock, SpawnTimer,
    },
};
use laststand_common::CharacterId;

/// A world with every run resource in place but no entities.
pub fn create_test_world() -> World {
    let mut world = World::default();
    world.init_resource::<Events<GameEvent>>();
    world.init_resource::<Events<DamageEvent>>();
    world.init_resource::<DeltaTime>();
    world.init_resource::<PlayerInput>();
    world.init_resource::<GameStage>();
    world.init_resource::<KillCount>();
    world.init_resource::<Experience>();
    world.init_resource::<RunClock>();
    world.init_resource::<SpawnTimer>();
    world.insert_resource(GameRng::seeded(42));
    world.insert_resource(SelectedCharacter(CharacterId::Rookie));
    world
}

pub fn rookie_stats() -> PlayerStats {
    PlayerStats {
        health: 100.0,
        max_health: 100.0,
        speed: 150.0,
        defense: 0.0,
        damage_multiplier: 1.0,
    }
}

pub fn spawn_test_player(world: &mut World, stats: PlayerStats) -> Entity {
    world.spawn(PlayerBundle::new(stats)).id()
}

/// An enemy with unscaled stats.
pub fn spawn_enemy(world: &mut World, kind: EnemyKind, position: Vec2) -> Entity {
    world
        .spawn(EnemyBundle::new(kind, constants::enemy_stats(kind), position))
        .id()
}

pub fn position_of(world: &World, entity: Entity) -> Vec2 {
    world.get::<Position>(entity).expect("entity should have a position").0
}

pub fn damage_events(world: &mut World) -> Vec<DamageEvent> {
    world.resource_mut::<Events<DamageEvent>>().drain().collect()
}

pub fn game_events(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Events<GameEvent>>().drain().collect()
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
