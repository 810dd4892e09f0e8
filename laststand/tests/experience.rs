use std::collections::HashSet;

use bevy_ecs::{system::RunSystemOnce, world::World};
use glam::Vec2;
use laststand::{
    events::GameEvent,
    systems::{
        apply_upgrade, level_check_system, spawn_weapon, xp_collection_system, Experience, GameStage, PlayerStats, Position,
        Upgrade, Weapon, XpGem,
    },
};
use laststand_common::{WeaponKind, MAX_WEAPON_LEVEL};
use speculoos::prelude::*;

mod common;

fn weapons(world: &mut World) -> Vec<Weapon> {
    let mut weapons: Vec<Weapon> = world.query::<&Weapon>().iter(world).cloned().collect();
    weapons.sort_by_key(|weapon| weapon.slot);
    weapons
}

fn player_stats(world: &mut World) -> PlayerStats {
    *world.query::<&PlayerStats>().single(world).unwrap()
}

#[test]
fn test_gems_inside_the_collection_radius_are_collected() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, common::rookie_stats());
    world.spawn((Position(Vec2::new(30.0, 30.0)), XpGem { value: 5 }));
    world.spawn((Position(Vec2::new(49.0, 0.0)), XpGem { value: 2 }));
    world.spawn((Position(Vec2::new(60.0, 0.0)), XpGem { value: 10 }));

    world
        .run_system_once(xp_collection_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<Experience>().current).is_equal_to(7);
    assert_that(&world.query::<&XpGem>().iter(&world).count()).is_equal_to(1);
}

#[test]
fn test_level_up_carries_over_surplus_and_offers_three_upgrades() {
    let mut world = common::create_test_world();
    world.insert_resource(Experience {
        level: 1,
        current: 12,
        required: 10,
    });

    world
        .run_system_once(level_check_system)
        .expect("System should run successfully");

    assert_that(&*world.resource::<Experience>()).is_equal_to(Experience {
        level: 2,
        current: 2,
        required: 12,
    });

    let GameStage::LevelUp { choices } = *world.resource::<GameStage>() else {
        panic!("Expected the run to wait on an upgrade choice");
    };
    let distinct: HashSet<Upgrade> = choices.into_iter().collect();
    assert_that(&distinct.len()).is_equal_to(3);
    assert_that(&common::game_events(&mut world)).is_equal_to(vec![GameEvent::LevelUp { level: 2 }]);
}

#[test]
fn test_no_level_up_below_the_requirement() {
    let mut world = common::create_test_world();
    world.insert_resource(Experience {
        level: 3,
        current: 13,
        required: 14,
    });

    world
        .run_system_once(level_check_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<Experience>().level).is_equal_to(3);
    assert_that(&*world.resource::<GameStage>()).is_equal_to(GameStage::Playing);
}

#[test]
fn test_max_health_upgrade_heals_up_to_the_new_cap() {
    let mut world = common::create_test_world();
    common::spawn_test_player(
        &mut world,
        PlayerStats {
            health: 90.0,
            ..common::rookie_stats()
        },
    );

    apply_upgrade(&mut world, Upgrade::MaxHealth);
    let stats = player_stats(&mut world);
    assert_that(&stats.max_health).is_equal_to(120.0);
    assert_that(&stats.health).is_equal_to(110.0);

    apply_upgrade(&mut world, Upgrade::MaxHealth);
    let stats = player_stats(&mut world);
    assert_that(&stats.max_health).is_equal_to(140.0);
    assert_that(&stats.health).is_equal_to(130.0);
}

#[test]
fn test_stat_upgrades() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, common::rookie_stats());

    apply_upgrade(&mut world, Upgrade::Speed);
    apply_upgrade(&mut world, Upgrade::Defense);

    let stats = player_stats(&mut world);
    assert_that(&common::approx_eq(stats.speed, 180.0)).is_true();
    assert_that(&stats.defense).is_equal_to(5.0);
}

#[test]
fn test_weapon_upgrade_equips_then_levels() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, common::rookie_stats());
    spawn_weapon(&mut world, WeaponKind::Hamburger, 1);

    apply_upgrade(&mut world, Upgrade::PizzaCutter);
    let equipped = weapons(&mut world);
    assert_that(&equipped).has_length(2);
    assert_that(&equipped[1].kind).is_equal_to(WeaponKind::PizzaCutter);
    assert_that(&equipped[1].level).is_equal_to(1);

    apply_upgrade(&mut world, Upgrade::PizzaCutter);
    let cutter = weapons(&mut world)[1].clone();
    assert_that(&cutter.level).is_equal_to(2);
    assert_that(&cutter.damage).is_equal_to(12.0);
}

#[test]
fn test_hamburger_upgrade_adds_flat_damage_or_grants_one() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, common::rookie_stats());
    spawn_weapon(&mut world, WeaponKind::IceCreamScoop, 1);

    apply_upgrade(&mut world, Upgrade::HamburgerDamage);
    let equipped = weapons(&mut world);
    assert_that(&equipped[1].kind).is_equal_to(WeaponKind::Hamburger);
    assert_that(&equipped[1].damage).is_equal_to(10.0);

    apply_upgrade(&mut world, Upgrade::HamburgerDamage);
    assert_that(&weapons(&mut world)[1].damage).is_equal_to(20.0);
}

#[test]
fn test_weapon_upgrade_stops_at_the_level_cap() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, common::rookie_stats());
    spawn_weapon(&mut world, WeaponKind::CoffeeMachine, MAX_WEAPON_LEVEL);
    let capped = weapons(&mut world)[0].clone();

    apply_upgrade(&mut world, Upgrade::CoffeeMachine);

    let equipped = weapons(&mut world);
    assert_that(&equipped).has_length(1);
    assert_that(&equipped[0]).is_equal_to(capped);
}
