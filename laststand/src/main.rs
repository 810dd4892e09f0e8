#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use laststand::app::{App, RunnerSettings};
use laststand::constants::LOOP_TIME;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Plays one autopiloted run headlessly and reports the outcome.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,laststand=info")))
        .init();

    let settings = RunnerSettings::from_env()?;
    info!(
        character = %settings.character,
        seed = settings.seed,
        online = settings.api.is_some(),
        "Starting run"
    );

    let mut app = App::new(settings).await?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run().await? {}

    let summary = app.finish().await?;
    info!(
        character = %summary.character,
        outcome = ?summary.outcome,
        survival_ms = summary.survival_ms,
        level = summary.level,
        kills = summary.kills,
        "Run finished"
    );
    Ok(())
}
