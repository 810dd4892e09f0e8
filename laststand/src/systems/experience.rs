use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::With,
    system::{Commands, Query, ResMut, Single},
    world::World,
};
use laststand_common::{WeaponKind, MAX_WEAPON_LEVEL};
use rand::seq::SliceRandom;
use strum_macros::Display;
use tracing::info;

use crate::constants::{self, upgrade, xp};
use crate::events::GameEvent;
use crate::systems::{Experience, GameRng, GameStage, Orbital, Player, PlayerStats, Position, Weapon, XpGem};

/// A reward offered on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "camelCase")]
pub enum Upgrade {
    HamburgerDamage,
    PizzaCutter,
    CoffeeMachine,
    Speed,
    MaxHealth,
    Defense,
}

const UPGRADE_POOL: [Upgrade; 6] = [
    Upgrade::HamburgerDamage,
    Upgrade::PizzaCutter,
    Upgrade::CoffeeMachine,
    Upgrade::Speed,
    Upgrade::MaxHealth,
    Upgrade::Defense,
];

/// Three distinct upgrades drawn from the pool.
pub fn roll_upgrades(rng: &mut GameRng) -> [Upgrade; upgrade::CHOICES] {
    let mut pool = UPGRADE_POOL;
    pool.shuffle(&mut rng.0);
    [pool[0], pool[1], pool[2]]
}

/// Pulls in every gem inside the collection radius.
pub fn xp_collection_system(
    mut commands: Commands,
    player: Single<&Position, With<Player>>,
    gems: Query<(Entity, &Position, &XpGem)>,
    mut experience: ResMut<Experience>,
) {
    for (entity, position, gem) in gems.iter() {
        if player.0.distance(position.0) < xp::COLLECTION_RADIUS {
            experience.current += gem.value;
            commands.entity(entity).despawn();
        }
    }
}

/// Levels the player up at most once per tick and pauses the run on the upgrade choice.
pub fn level_check_system(
    mut experience: ResMut<Experience>,
    mut rng: ResMut<GameRng>,
    mut stage: ResMut<GameStage>,
    mut events: EventWriter<GameEvent>,
) {
    if experience.current < experience.required {
        return;
    }

    experience.current -= experience.required;
    experience.level += 1;
    experience.required = constants::required_xp(experience.level);

    let choices = roll_upgrades(&mut rng);
    info!(level = experience.level, ?choices, "Level up");
    *stage = GameStage::LevelUp { choices };
    events.write(GameEvent::LevelUp {
        level: experience.level,
    });
}

fn next_slot(world: &mut World) -> u8 {
    world
        .query::<&Weapon>()
        .iter(world)
        .map(|weapon| weapon.slot.saturating_add(1))
        .max()
        .unwrap_or(0)
}

/// Equip `kind`, or level it up if it is already equipped. Weapons stop leveling at `MAX_WEAPON_LEVEL`.
pub fn add_or_level_weapon(world: &mut World, kind: WeaponKind) {
    let mut weapons = world.query::<&mut Weapon>();
    let equipped = weapons
        .iter_mut(world)
        .find(|weapon| weapon.kind == kind)
        .map(|mut weapon| {
            if weapon.level < MAX_WEAPON_LEVEL {
                weapon.level_up();
            }
        })
        .is_some();
    if !equipped {
        spawn_weapon(world, kind, 1);
    }
}

/// Spawn a weapon entity at `level` in the next free slot.
pub fn spawn_weapon(world: &mut World, kind: WeaponKind, level: u32) {
    let slot = next_slot(world);
    let weapon = Weapon::at_level(kind, slot, level);
    if kind == WeaponKind::IceCreamScoop {
        world.spawn((weapon, Orbital::default()));
    } else {
        world.spawn(weapon);
    }
}

/// Apply a chosen upgrade to the player and their arsenal.
pub fn apply_upgrade(world: &mut World, choice: Upgrade) {
    match choice {
        Upgrade::HamburgerDamage => add_or_level_weapon(world, WeaponKind::Hamburger),
        Upgrade::PizzaCutter => add_or_level_weapon(world, WeaponKind::PizzaCutter),
        Upgrade::CoffeeMachine => add_or_level_weapon(world, WeaponKind::CoffeeMachine),
        Upgrade::Speed | Upgrade::MaxHealth | Upgrade::Defense => {
            let mut players = world.query_filtered::<&mut PlayerStats, With<Player>>();
            for mut stats in players.iter_mut(world) {
                match choice {
                    Upgrade::Speed => stats.speed *= upgrade::SPEED_MULTIPLIER,
                    Upgrade::MaxHealth => {
                        stats.max_health += upgrade::MAX_HEALTH_BONUS;
                        stats.health = (stats.health + upgrade::HEAL_AMOUNT).min(stats.max_health);
                    }
                    _ => stats.defense += upgrade::DEFENSE_BONUS,
                }
            }
        }
    }
    info!(upgrade = %choice, "Upgrade applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rolled_upgrades_are_distinct() {
        let mut rng = GameRng::seeded(7);
        for _ in 0..50 {
            let choices = roll_upgrades(&mut rng);
            let unique: HashSet<_> = choices.iter().collect();
            assert_eq!(unique.len(), choices.len());
        }
    }
}
