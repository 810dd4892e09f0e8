use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use laststand_common::{
    api::{LoadResponse, MessageResponse, SaveResponse},
    SaveData, MAX_GAME_TIMER_MS,
};
use tracing::{debug, info, instrument, warn};

use crate::auth::AuthenticatedUser;
use crate::data::{self, save as save_repo};
use crate::errors::{messages, ErrorResponse};
use crate::{app::AppState, routes::json_body};

/// A save must describe a run that could actually be resumed.
fn validate_save(save: &SaveData) -> Result<(), ErrorResponse> {
    let stats = [
        save.player_health,
        save.player_max_health,
        save.player_speed,
        save.player_defense,
        save.player_damage_multiplier,
    ];
    let valid = save.player_level >= 1
        && save.required_xp >= 1
        && stats.iter().all(|stat| stat.is_finite() && *stat >= 0.0)
        && save.player_health <= save.player_max_health
        && save.game_timer <= MAX_GAME_TIMER_MS
        && save.weapons_problem().is_none();

    if valid {
        Ok(())
    } else {
        Err(ErrorResponse::bad_request(messages::INVALID_BODY))
    }
}

#[instrument(skip_all, fields(user_id = user.user_id))]
pub async fn load_handler(State(app_state): State<AppState>, user: AuthenticatedUser) -> axum::response::Response {
    match save_repo::find_save(&app_state.db, user.user_id).await {
        Ok(save) => {
            debug!(found = save.is_some(), "Loaded save slot");
            Json(LoadResponse { success: true, save }).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to load save");
            ErrorResponse::internal(messages::LOAD_FAILED).into_response()
        }
    }
}

#[instrument(skip_all, fields(user_id = user.user_id))]
pub async fn save_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    body: Result<Json<SaveData>, JsonRejection>,
) -> axum::response::Response {
    let save = match json_body(body) {
        Ok(save) => save,
        Err(e) => return e.into_response(),
    };
    if let Err(e) = validate_save(&save) {
        return e.into_response();
    }

    let saved_at = data::now_millis();
    if let Err(e) = save_repo::upsert_save(&app_state.db, user.user_id, &save, saved_at).await {
        warn!(error = %e, "Failed to store save");
        return ErrorResponse::internal(messages::SAVE_FAILED).into_response();
    }

    info!(level = save.player_level, game_timer = save.game_timer, "Game saved");
    Json(SaveResponse {
        success: true,
        message: messages::GAME_SAVED.into(),
        saved_at,
    })
    .into_response()
}

#[instrument(skip_all, fields(user_id = user.user_id))]
pub async fn delete_handler(State(app_state): State<AppState>, user: AuthenticatedUser) -> axum::response::Response {
    match save_repo::delete_save(&app_state.db, user.user_id).await {
        Ok(existed) => {
            debug!(existed, "Deleted save slot");
            Json(MessageResponse {
                success: true,
                message: messages::SAVE_DELETED.into(),
            })
            .into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to delete save");
            ErrorResponse::internal(messages::DELETE_FAILED).into_response()
        }
    }
}
