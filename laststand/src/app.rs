use std::env;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use laststand_common::CharacterId;
use tracing::{debug, info, warn};

use crate::autopilot;
use crate::client::ApiClient;
use crate::constants::LOOP_TIME;
use crate::error::ClientError;
use crate::events::GameEvent;
use crate::game::{Game, GameSetup, RunSummary};
use crate::systems::GameStage;

/// Where to report a run, read from `LASTSTAND_API_URL`, `LASTSTAND_USERNAME` and `LASTSTAND_PASSWORD`.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub character: CharacterId,
    pub seed: u64,
    /// Pace ticks to wall-clock time instead of simulating as fast as possible.
    pub realtime: bool,
    pub api: Option<ApiSettings>,
}

impl RunnerSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        let character = match env::var("LASTSTAND_CHARACTER") {
            Ok(raw) => CharacterId::from_str(&raw).with_context(|| format!("unknown chef '{raw}'"))?,
            Err(_) => CharacterId::default(),
        };
        let seed = match env::var("LASTSTAND_SEED") {
            Ok(raw) => raw.parse().with_context(|| format!("LASTSTAND_SEED '{raw}' is not a number"))?,
            Err(_) => rand::random(),
        };
        let realtime = env::var("LASTSTAND_REALTIME").is_ok_and(|value| value == "1" || value == "true");

        let api = match (
            env::var("LASTSTAND_API_URL"),
            env::var("LASTSTAND_USERNAME"),
            env::var("LASTSTAND_PASSWORD"),
        ) {
            (Ok(url), Ok(username), Ok(password)) => Some(ApiSettings { url, username, password }),
            _ => None,
        };

        Ok(Self {
            character,
            seed,
            realtime,
            api,
        })
    }
}

/// Drives one autopiloted run, optionally mirroring it to the API.
pub struct App {
    pub game: Game,
    client: Option<ApiClient>,
    realtime: bool,
}

impl App {
    /// Signs in (registering on first use) when an API is configured, and resumes the account's save if there is one.
    pub async fn new(settings: RunnerSettings) -> anyhow::Result<Self> {
        let client = match &settings.api {
            Some(api) => Some(Self::connect(api).await?),
            None => None,
        };

        let saved = match &client {
            Some(client) => client.load_game().await.context("could not load the saved run")?,
            None => None,
        };
        let setup = match saved {
            Some(save) => {
                info!(game_timer = save.game_timer, level = save.player_level, "Continuing saved run");
                GameSetup::Resume {
                    save,
                    seed: settings.seed,
                }
            }
            None => GameSetup::New {
                character: settings.character,
                seed: settings.seed,
            },
        };

        Ok(Self {
            game: Game::new(setup)?,
            client,
            realtime: settings.realtime,
        })
    }

    async fn connect(api: &ApiSettings) -> anyhow::Result<ApiClient> {
        let mut client = ApiClient::new(api.url.as_str())?;
        match client.login(&api.username, &api.password).await {
            Ok(auth) => info!(username = %auth.username, "Logged in"),
            Err(ClientError::Api { status, message }) => {
                debug!(status, %message, "Login refused, registering instead");
                let auth = client
                    .register(&api.username, &api.password)
                    .await
                    .context("could not log in or register")?;
                info!(username = %auth.username, "Registered");
            }
            Err(e) => return Err(e).context("could not reach the API"),
        }
        Ok(client)
    }

    /// Executes a single step of the run.
    ///
    /// # Returns
    ///
    /// `true` while the run is still going.
    pub async fn run(&mut self) -> anyhow::Result<bool> {
        let start = Instant::now();

        match self.game.stage() {
            GameStage::Playing => {
                let direction = autopilot::steer(&mut self.game);
                self.game.tick(direction);
            }
            GameStage::LevelUp { choices } => {
                let upgrade = self.game.choose_upgrade(autopilot::pick_upgrade(&choices))?;
                debug!(%upgrade, "Autopilot picked upgrade");
            }
            GameStage::Paused => {
                self.game.toggle_pause();
            }
            GameStage::Victory | GameStage::Defeat => return Ok(false),
        }

        for event in self.game.drain_events() {
            if let GameEvent::AutoSave { game_timer } = event {
                self.autosave(game_timer).await;
            }
        }

        if self.realtime && start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                tokio::time::sleep(time).await;
            }
        }

        Ok(true)
    }

    /// A failed autosave is logged and the run carries on.
    async fn autosave(&mut self, game_timer: u64) {
        let Some(client) = &self.client else {
            return;
        };
        let save = match self.game.snapshot() {
            Ok(save) => save,
            Err(e) => {
                warn!(error = %e, "Could not snapshot the run");
                return;
            }
        };
        match client.save_game(&save).await {
            Ok(saved_at) => debug!(game_timer, saved_at, "Autosaved"),
            Err(e) => warn!(error = %e, game_timer, "Autosave failed"),
        }
    }

    /// Clears the finished run's save slot and folds its results into the profile.
    pub async fn finish(self) -> anyhow::Result<RunSummary> {
        let summary = self.game.summary();
        if let Some(client) = &self.client {
            client.delete_save().await.context("could not clear the save slot")?;
            let profile = client
                .update_profile(&summary.profile_update)
                .await
                .context("could not submit the run")?;
            info!(
                games_played = profile.total_games_played,
                longest_survival = profile.high_scores.longest_survival_time,
                "Run submitted"
            );
        }
        Ok(summary)
    }
}
