use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use laststand_common::{api::ProfileResponse, ProfileUpdate};
use tracing::{debug, info, instrument, warn};

use crate::auth::AuthenticatedUser;
use crate::data::{self, user as user_repo};
use crate::errors::{messages, ErrorResponse};
use crate::{app::AppState, routes::json_body};

/// Reject updates that would decrease a running total or push a volume outside 0..=1.
fn validate_update(update: &ProfileUpdate) -> Result<(), ErrorResponse> {
    let counters = [
        update.total_playtime,
        update.total_kills,
        update.total_games_played,
        update.longest_survival_time,
        update.highest_level,
        update.most_kills,
    ];
    if counters.into_iter().flatten().any(|value| value < 0) {
        return Err(ErrorResponse::bad_request(messages::INVALID_BODY));
    }

    let volumes = [update.music_volume, update.sfx_volume];
    if volumes
        .into_iter()
        .flatten()
        .any(|volume| !(0.0..=1.0).contains(&volume))
    {
        return Err(ErrorResponse::bad_request(messages::INVALID_BODY));
    }

    if update.add_achievement.as_deref().is_some_and(|id| id.trim().is_empty()) {
        return Err(ErrorResponse::bad_request(messages::INVALID_BODY));
    }
    Ok(())
}

#[instrument(skip_all, fields(user_id = user.user_id))]
pub async fn get_profile_handler(State(app_state): State<AppState>, user: AuthenticatedUser) -> axum::response::Response {
    match user_repo::load_profile(&app_state.db, user.user_id).await {
        Ok(Some(profile)) => Json(ProfileResponse {
            success: true,
            message: None,
            profile,
        })
        .into_response(),
        Ok(None) => {
            debug!("Session belongs to a deleted user");
            ErrorResponse::not_found(messages::USER_NOT_FOUND).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to load profile");
            ErrorResponse::internal(messages::PROFILE_LOAD_FAILED).into_response()
        }
    }
}

#[instrument(skip_all, fields(user_id = user.user_id))]
pub async fn update_profile_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> axum::response::Response {
    let update = match json_body(body) {
        Ok(update) => update,
        Err(e) => return e.into_response(),
    };
    if let Err(e) = validate_update(&update) {
        return e.into_response();
    }

    if !update.is_empty() {
        if let Err(e) = user_repo::apply_profile_update(&app_state.db, user.user_id, &update, data::now_millis()).await {
            warn!(error = %e, "Failed to apply profile update");
            return ErrorResponse::internal(messages::PROFILE_UPDATE_FAILED).into_response();
        }
        info!(?update, "Profile updated");
    }

    match user_repo::load_profile(&app_state.db, user.user_id).await {
        Ok(Some(profile)) => Json(ProfileResponse {
            success: true,
            message: Some(messages::PROFILE_UPDATED.into()),
            profile,
        })
        .into_response(),
        Ok(None) => ErrorResponse::not_found(messages::USER_NOT_FOUND).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to reload profile after update");
            ErrorResponse::internal(messages::PROFILE_UPDATE_FAILED).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_update_accepts_partial_updates() {
        let update = ProfileUpdate {
            total_kills: Some(12),
            music_volume: Some(0.0),
            ..Default::default()
        };
        assert!(validate_update(&update).is_ok());
    }

    #[test]
    fn test_validate_update_rejects_negative_totals() {
        let update = ProfileUpdate {
            total_playtime: Some(-1),
            ..Default::default()
        };
        assert!(validate_update(&update).is_err());
    }

    #[test]
    fn test_validate_update_rejects_out_of_range_volume() {
        let update = ProfileUpdate {
            sfx_volume: Some(1.5),
            ..Default::default()
        };
        assert!(validate_update(&update).is_err());
    }
}
