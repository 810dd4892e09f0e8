use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::{debug, info};

use crate::constants::{AUTOSAVE_INTERVAL_SECS, RUN_DURATION_SECS};
use crate::events::GameEvent;
use crate::systems::{DeltaTime, Upgrade};

/// A resource to track the overall stage of the run from a high-level perspective.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStage {
    /// The main gameplay loop is active.
    #[default]
    Playing,
    Paused,
    /// Gameplay is frozen until one of the offered upgrades is chosen.
    LevelUp { choices: [Upgrade; 3] },
    Victory,
    Defeat,
}

impl GameStage {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStage::Victory | GameStage::Defeat)
    }
}

/// Run condition for every gameplay system.
pub fn is_playing(stage: Res<GameStage>) -> bool {
    matches!(*stage, GameStage::Playing)
}

/// Elapsed run time.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct RunClock {
    pub elapsed: f64,
    pub since_autosave: f64,
}

impl RunClock {
    pub fn from_millis(millis: u64) -> Self {
        Self {
            elapsed: millis as f64 / 1000.0,
            since_autosave: 0.0,
        }
    }

    pub fn millis(&self) -> u64 {
        (self.elapsed * 1000.0).round() as u64
    }

    /// Minutes survived, including the fraction of the current one; drives difficulty.
    pub fn minutes(&self) -> f32 {
        (self.elapsed / 60.0) as f32
    }

    /// Completed minutes; boss marks fall on these.
    pub fn whole_minutes(&self) -> u32 {
        (self.elapsed / 60.0).floor() as u32
    }
}

/// Advances the run clock, raises autosave checkpoints, and ends the run in victory at the time limit.
pub fn run_clock_system(
    dt: Res<DeltaTime>,
    mut clock: ResMut<RunClock>,
    mut stage: ResMut<GameStage>,
    mut events: EventWriter<GameEvent>,
) {
    clock.elapsed += f64::from(dt.seconds);
    clock.since_autosave += f64::from(dt.seconds);

    if clock.since_autosave >= AUTOSAVE_INTERVAL_SECS {
        clock.since_autosave -= AUTOSAVE_INTERVAL_SECS;
        debug!(game_timer = clock.millis(), "Autosave checkpoint");
        events.write(GameEvent::AutoSave {
            game_timer: clock.millis(),
        });
    }

    if clock.elapsed >= RUN_DURATION_SECS {
        clock.elapsed = RUN_DURATION_SECS;
        info!(game_timer = clock.millis(), "Survived until closing time");
        *stage = GameStage::Victory;
        events.write(GameEvent::Victory);
    }
}
