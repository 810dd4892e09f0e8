//! This module contains the main game logic and state.

use bevy_ecs::event::Events;
use bevy_ecs::query::With;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use glam::Vec2;
use laststand_common::{CharacterId, ProfileUpdate, SaveData};
use tracing::{debug, info};

use crate::constants;
use crate::error::{GameError, GameResult};
use crate::events::{DamageEvent, GameEvent};
use crate::save::{self, SelectedCharacter};
use crate::systems::{
    self, area_effect_system, contact_damage_system, damage_system, enemy_movement_system, is_playing, level_check_system,
    player_movement_system, projectile_system, run_clock_system, spawn_system, weapon_system, xp_collection_system,
    DeltaTime, Experience, GameRng, GameStage, KillCount, Player, PlayerBundle, PlayerInput, PlayerStats, RunClock,
    SpawnTimer, Upgrade,
};

/// System sets for one gameplay tick, run in declaration order.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Advances the run clock; may end the run.
    Clock,
    /// Moves everything and fires weapons.
    Update,
    /// Resolves hits on enemies and on the player.
    Combat,
    /// Collects rewards and checks for a level-up.
    Respond,
}

/// How a run starts.
#[derive(Debug, Clone)]
pub enum GameSetup {
    New { character: CharacterId, seed: u64 },
    Resume { save: SaveData, seed: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Where a run stands, and what it contributes to the player's profile.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub character: CharacterId,
    /// `None` while the run is still in progress.
    pub outcome: Option<Outcome>,
    pub survival_ms: u64,
    pub level: u32,
    pub kills: u32,
    pub profile_update: ProfileUpdate,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// The `World` holds the chef, enemies, weapons and run resources, while the
/// `Schedule` runs one fixed step of gameplay per [`Game::tick`].
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    events: Vec<GameEvent>,
}

impl Game {
    /// Builds a world for a fresh run or for a resumed save.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidSave` if a resumed save describes an impossible run.
    pub fn new(setup: GameSetup) -> GameResult<Game> {
        info!("Starting game initialization");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);

        match setup {
            GameSetup::New { character, seed } => {
                debug!(%character, seed, "Setting up a new run");
                world.insert_resource(GameRng::seeded(seed));
                Self::spawn_new_run(&mut world, character);
            }
            GameSetup::Resume { save, seed } => {
                debug!(character = %save.selected_character, game_timer = save.game_timer, seed, "Resuming a saved run");
                world.insert_resource(GameRng::seeded(seed));
                save::restore(&mut world, &save)?;
            }
        }

        Self::configure_schedule(&mut schedule);

        info!("Game initialization completed successfully");
        Ok(Game {
            world,
            schedule,
            events: Vec::new(),
        })
    }

    fn setup_ecs(world: &mut World) {
        world.init_resource::<Events<GameEvent>>();
        world.init_resource::<Events<DamageEvent>>();
        world.init_resource::<DeltaTime>();
        world.init_resource::<PlayerInput>();
        world.init_resource::<GameStage>();
    }

    fn spawn_new_run(world: &mut World, character: CharacterId) {
        let chef = constants::character_stats(character);
        world.insert_resource(SelectedCharacter(character));
        world.init_resource::<KillCount>();
        world.init_resource::<Experience>();
        world.init_resource::<RunClock>();
        world.init_resource::<SpawnTimer>();

        world.spawn(PlayerBundle::new(PlayerStats {
            health: chef.health,
            max_health: chef.health,
            speed: chef.speed,
            defense: chef.defense,
            damage_multiplier: chef.damage_multiplier,
        }));
        systems::spawn_weapon(world, chef.starting_weapon, 1);
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                run_clock_system.in_set(GameplaySet::Clock),
                (
                    player_movement_system,
                    spawn_system,
                    enemy_movement_system,
                    weapon_system,
                    projectile_system,
                    area_effect_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (damage_system, contact_damage_system).chain().in_set(GameplaySet::Combat),
                (xp_collection_system, level_check_system)
                    .chain()
                    .in_set(GameplaySet::Respond),
            ))
            .configure_sets((
                GameplaySet::Clock.run_if(is_playing),
                GameplaySet::Update.run_if(is_playing).after(GameplaySet::Clock),
                GameplaySet::Combat.run_if(is_playing).after(GameplaySet::Update),
                GameplaySet::Respond.run_if(is_playing).after(GameplaySet::Combat),
            ));
    }

    /// Advances the run by one fixed step, steering the chef toward `direction`.
    pub fn tick(&mut self, direction: Vec2) {
        self.world.insert_resource(PlayerInput(direction));
        self.schedule.run(&mut self.world);

        self.world.resource_mut::<Events<DamageEvent>>().update();
        let emitted: Vec<GameEvent> = self.world.resource_mut::<Events<GameEvent>>().drain().collect();
        self.events.extend(emitted);
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    /// Takes the upgrade at `index` among those offered by the pending level-up and resumes play.
    pub fn choose_upgrade(&mut self, index: usize) -> GameResult<Upgrade> {
        let GameStage::LevelUp { choices } = self.stage() else {
            return Err(GameError::InvalidState("no level-up is pending".into()));
        };
        let choice = *choices
            .get(index)
            .ok_or_else(|| GameError::InvalidState(format!("upgrade choice {index} is out of range")))?;

        systems::apply_upgrade(&mut self.world, choice);
        *self.world.resource_mut::<GameStage>() = GameStage::Playing;
        Ok(choice)
    }

    /// Switches between playing and paused; other stages are left alone.
    pub fn toggle_pause(&mut self) -> GameStage {
        let mut stage = self.world.resource_mut::<GameStage>();
        *stage = match *stage {
            GameStage::Playing => GameStage::Paused,
            GameStage::Paused => GameStage::Playing,
            other => other,
        };
        *stage
    }

    pub fn player_stats(&mut self) -> GameResult<PlayerStats> {
        self.world
            .query_filtered::<&PlayerStats, With<Player>>()
            .single(&self.world)
            .copied()
            .map_err(|e| GameError::InvalidState(format!("no single player: {e}")))
    }

    pub fn snapshot(&mut self) -> GameResult<SaveData> {
        save::snapshot(&mut self.world)
    }

    pub fn summary(&self) -> RunSummary {
        let outcome = match self.stage() {
            GameStage::Victory => Some(Outcome::Victory),
            GameStage::Defeat => Some(Outcome::Defeat),
            _ => None,
        };
        let survival_ms = self.world.resource::<RunClock>().millis();
        let level = self.world.resource::<Experience>().level;
        let kills = self.world.resource::<KillCount>().0;

        RunSummary {
            character: self.world.resource::<SelectedCharacter>().0,
            outcome,
            survival_ms,
            level,
            kills,
            profile_update: ProfileUpdate {
                total_playtime: Some(survival_ms as i64),
                total_kills: Some(i64::from(kills)),
                total_games_played: Some(1),
                longest_survival_time: Some(survival_ms as i64),
                highest_level: Some(i64::from(level)),
                most_kills: Some(i64::from(kills)),
                ..ProfileUpdate::default()
            },
        }
    }

    /// Everything emitted since the previous call, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
