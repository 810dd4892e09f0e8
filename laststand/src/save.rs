//! Conversion between a live world and a resumable [`SaveData`] snapshot.

use bevy_ecs::{query::With, resource::Resource, world::World};
use laststand_common::{CharacterId, SaveData, WeaponSave, MAX_GAME_TIMER_MS};

use crate::error::{GameError, GameResult};
use crate::systems::{spawn_weapon, Experience, KillCount, Player, PlayerBundle, PlayerStats, RunClock, SpawnTimer, Weapon};

/// The chef this run is being played with.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectedCharacter(pub CharacterId);

/// Reject snapshots that could not have come from a real run.
pub fn validate(save: &SaveData) -> GameResult<()> {
    let stats = [
        ("playerHealth", save.player_health),
        ("playerMaxHealth", save.player_max_health),
        ("playerSpeed", save.player_speed),
        ("playerDefense", save.player_defense),
        ("playerDamageMultiplier", save.player_damage_multiplier),
    ];
    if let Some((name, value)) = stats.iter().find(|(_, value)| !value.is_finite() || *value < 0.0) {
        return Err(GameError::InvalidSave(format!("{name} must be a non-negative number, got {value}")));
    }
    if save.player_health <= 0.0 {
        return Err(GameError::InvalidSave("the chef in this save is already down".into()));
    }
    if save.player_health > save.player_max_health {
        return Err(GameError::InvalidSave("playerHealth exceeds playerMaxHealth".into()));
    }
    if save.player_level == 0 || save.required_xp == 0 {
        return Err(GameError::InvalidSave("level and requiredXP start at 1".into()));
    }
    if save.game_timer > MAX_GAME_TIMER_MS {
        return Err(GameError::InvalidSave(format!(
            "gameTimer {} is past the end of a run",
            save.game_timer
        )));
    }
    if let Some(problem) = save.weapons_problem() {
        return Err(GameError::InvalidSave(problem));
    }
    Ok(())
}

/// Populate a fresh world from `save`. Enemies, gems and projectiles are not part of a save;
/// a resumed run starts with an empty kitchen.
pub fn restore(world: &mut World, save: &SaveData) -> GameResult<()> {
    validate(save)?;

    let clock = RunClock::from_millis(save.game_timer);
    world.insert_resource(SpawnTimer::resumed_at(clock.whole_minutes()));
    world.insert_resource(clock);
    world.insert_resource(SelectedCharacter(save.selected_character));
    world.insert_resource(KillCount(save.kill_count));
    world.insert_resource(Experience {
        level: save.player_level,
        current: save.current_xp,
        required: save.required_xp,
    });

    world.spawn(PlayerBundle::new(PlayerStats {
        health: save.player_health,
        max_health: save.player_max_health,
        speed: save.player_speed,
        defense: save.player_defense,
        damage_multiplier: save.player_damage_multiplier,
    }));

    if save.weapons.is_empty() {
        let starting = crate::constants::character_stats(save.selected_character).starting_weapon;
        spawn_weapon(world, starting, 1);
    }
    for weapon in &save.weapons {
        spawn_weapon(world, weapon.kind, weapon.level);
    }
    Ok(())
}

/// Capture everything needed to resume the run later. `saved_at` is left for the persister to stamp.
pub fn snapshot(world: &mut World) -> GameResult<SaveData> {
    let stats = *world
        .query_filtered::<&PlayerStats, With<Player>>()
        .single(world)
        .map_err(|e| GameError::InvalidState(format!("no single player to save: {e}")))?;

    let mut weapons: Vec<&Weapon> = world.query::<&Weapon>().iter(world).collect();
    weapons.sort_by_key(|weapon| weapon.slot);
    let weapons = weapons
        .into_iter()
        .map(|weapon| WeaponSave {
            kind: weapon.kind,
            level: weapon.level,
        })
        .collect();

    let experience = *world.resource::<Experience>();
    Ok(SaveData {
        saved_at: 0,
        selected_character: world.resource::<SelectedCharacter>().0,
        player_level: experience.level,
        current_xp: experience.current,
        required_xp: experience.required,
        kill_count: world.resource::<KillCount>().0,
        game_timer: world.resource::<RunClock>().millis(),
        player_health: stats.health,
        player_max_health: stats.max_health,
        player_speed: stats.speed,
        player_defense: stats.defense,
        player_damage_multiplier: stats.damage_multiplier,
        weapons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use laststand_common::WeaponKind;
    use pretty_assertions::assert_eq;

    fn sample_save() -> SaveData {
        SaveData {
            saved_at: 0,
            selected_character: CharacterId::SushiChef,
            player_level: 4,
            current_xp: 3,
            required_xp: 17,
            kill_count: 52,
            game_timer: 185_000,
            player_health: 71.0,
            player_max_health: 95.0,
            player_speed: 170.0,
            player_defense: 0.0,
            player_damage_multiplier: 1.1,
            weapons: vec![
                WeaponSave {
                    kind: WeaponKind::PizzaCutter,
                    level: 2,
                },
                WeaponSave {
                    kind: WeaponKind::CoffeeMachine,
                    level: 1,
                },
            ],
        }
    }

    #[test]
    fn test_restore_then_snapshot_preserves_save() {
        let save = sample_save();
        let mut world = World::default();
        restore(&mut world, &save).unwrap();

        assert_eq!(snapshot(&mut world).unwrap(), save);
    }

    #[test]
    fn test_restored_weapon_keeps_leveled_damage() {
        let mut world = World::default();
        restore(&mut world, &sample_save()).unwrap();

        let cutter = world
            .query::<&Weapon>()
            .iter(&world)
            .find(|weapon| weapon.kind == WeaponKind::PizzaCutter)
            .cloned()
            .unwrap();
        assert_eq!(cutter.damage, 12.0);
    }

    #[test]
    fn test_restore_without_weapons_grants_starting_weapon() {
        let mut world = World::default();
        restore(
            &mut world,
            &SaveData {
                weapons: vec![],
                ..sample_save()
            },
        )
        .unwrap();

        let kinds: Vec<WeaponKind> = world.query::<&Weapon>().iter(&world).map(|weapon| weapon.kind).collect();
        assert_eq!(kinds, vec![WeaponKind::PizzaCutter]);
    }

    #[test]
    fn test_validate_rejects_impossible_saves() {
        let overhealed = SaveData {
            player_health: 200.0,
            ..sample_save()
        };
        let downed = SaveData {
            player_health: 0.0,
            ..sample_save()
        };
        let levelless = SaveData {
            player_level: 0,
            ..sample_save()
        };
        let nan_speed = SaveData {
            player_speed: f32::NAN,
            ..sample_save()
        };
        let overtime = SaveData {
            game_timer: u64::MAX,
            ..sample_save()
        };
        let hoarder = SaveData {
            weapons: vec![
                WeaponSave {
                    kind: WeaponKind::Hamburger,
                    level: 1,
                };
                300
            ],
            ..sample_save()
        };
        let overleveled = SaveData {
            weapons: vec![WeaponSave {
                kind: WeaponKind::CoffeeMachine,
                level: u32::MAX,
            }],
            ..sample_save()
        };

        for save in [overhealed, downed, levelless, nan_speed, overtime, hoarder, overleveled] {
            assert!(matches!(validate(&save), Err(GameError::InvalidSave(_))), "{save:?} was accepted");
        }
    }
}
