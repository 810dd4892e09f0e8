use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use laststand_common::{api::LeaderboardResponse, LeaderboardKind};
use serde::Deserialize;
use tracing::{instrument, trace, warn};

use crate::data::leaderboard as leaderboard_repo;
use crate::errors::{messages, ErrorResponse};
use crate::app::AppState;

pub const MAX_LEADERBOARD_LIMIT: u32 = 100;

/// Both parameters are parsed leniently; anything unrecognised falls back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<String>,
}

impl LeaderboardQuery {
    pub fn kind(&self) -> LeaderboardKind {
        self.kind
            .as_deref()
            .and_then(|kind| kind.parse().ok())
            .unwrap_or_default()
    }

    /// Integers are clamped into `1..=MAX_LEADERBOARD_LIMIT`; anything else means the maximum.
    pub fn limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|limit| limit.trim().parse::<i64>().ok())
            .map_or(MAX_LEADERBOARD_LIMIT, |limit| {
                limit.clamp(1, i64::from(MAX_LEADERBOARD_LIMIT)) as u32
            })
    }
}

#[instrument(skip_all)]
pub async fn leaderboard_handler(
    State(app_state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> axum::response::Response {
    let kind = query.kind();
    let limit = query.limit();
    trace!(%kind, limit, "Fetching leaderboard");

    match leaderboard_repo::top_players(&app_state.db, kind, limit).await {
        Ok(leaderboard) => Json(LeaderboardResponse {
            success: true,
            kind,
            leaderboard,
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, %kind, "Failed to fetch leaderboard");
            ErrorResponse::internal(messages::LEADERBOARD_FAILED).into_response()
        }
    }
}
