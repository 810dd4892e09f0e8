use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use laststand_common::api::{AuthResponse, Credentials, MessageResponse};
use tracing::{debug, info, instrument, warn};

use crate::auth::{self, AuthenticatedUser, MIN_PASSWORD_CHARS, MIN_USERNAME_CHARS};
use crate::data::{self, user as user_repo};
use crate::errors::{messages, ErrorResponse};
use crate::routes::json_body;
use crate::{app::AppState, session};

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[instrument(skip_all)]
pub async fn register_handler(
    State(app_state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> axum::response::Response {
    let credentials = match json_body(body) {
        Ok(credentials) => credentials,
        Err(e) => return e.into_response(),
    };
    let username = credentials.username.trim();
    let password = credentials.password.as_str();

    if username.chars().count() < MIN_USERNAME_CHARS {
        return ErrorResponse::bad_request(messages::USERNAME_TOO_SHORT).into_response();
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return ErrorResponse::bad_request(messages::PASSWORD_TOO_SHORT).into_response();
    }

    match user_repo::find_user_by_username(&app_state.db, username).await {
        Ok(Some(_)) => {
            debug!(%username, "Username already registered");
            return ErrorResponse::bad_request(messages::USERNAME_TAKEN).into_response();
        }
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "Failed to check for existing username");
            return ErrorResponse::internal(messages::REGISTER_FAILED).into_response();
        }
    }

    let password_hash = auth::hash_password(password);
    let user = match user_repo::create_user(&app_state.db, username, &password_hash, data::now_millis()).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration of the same name
        Err(e) if is_unique_violation(&e) => {
            return ErrorResponse::bad_request(messages::USERNAME_TAKEN).into_response();
        }
        Err(e) => {
            warn!(error = %e, "Failed to create user");
            return ErrorResponse::internal(messages::REGISTER_FAILED).into_response();
        }
    };

    let token = match session::create_session(&app_state, user.id).await {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, user_id = user.id, "Failed to create session for new user");
            return ErrorResponse::internal(messages::REGISTER_FAILED).into_response();
        }
    };

    info!(user_id = user.id, "Registered new account");
    Json(AuthResponse {
        success: true,
        message: messages::REGISTERED.into(),
        token,
        username: user.username,
    })
    .into_response()
}

#[instrument(skip_all)]
pub async fn login_handler(
    State(app_state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> axum::response::Response {
    let credentials = match json_body(body) {
        Ok(credentials) => credentials,
        Err(e) => return e.into_response(),
    };
    let username = credentials.username.trim();
    if username.is_empty() || credentials.password.is_empty() {
        return ErrorResponse::bad_request(messages::CREDENTIALS_REQUIRED).into_response();
    }

    let user = match user_repo::find_user_by_username(&app_state.db, username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!(%username, "Login for unknown user");
            return ErrorResponse::bad_request(messages::USER_NOT_FOUND).into_response();
        }
        Err(e) => {
            warn!(error = %e, "Failed to look up user");
            return ErrorResponse::internal(messages::LOGIN_FAILED).into_response();
        }
    };

    if !auth::verify_password(&credentials.password, &user.password_hash) {
        debug!(user_id = user.id, "Wrong password");
        return ErrorResponse::bad_request(messages::WRONG_PASSWORD).into_response();
    }

    if let Err(e) = user_repo::touch_last_login(&app_state.db, user.id, data::now_millis()).await {
        warn!(error = %e, user_id = user.id, "Failed to record last login");
        return ErrorResponse::internal(messages::LOGIN_FAILED).into_response();
    }

    let token = match session::create_session(&app_state, user.id).await {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, user_id = user.id, "Failed to create session");
            return ErrorResponse::internal(messages::LOGIN_FAILED).into_response();
        }
    };

    info!(user_id = user.id, "Signed in successfully");
    Json(AuthResponse {
        success: true,
        message: messages::LOGGED_IN.into(),
        token,
        username: user.username,
    })
    .into_response()
}

#[instrument(skip_all, fields(user_id = user.user_id))]
pub async fn logout_handler(State(app_state): State<AppState>, user: AuthenticatedUser) -> axum::response::Response {
    if let Err(e) = session::revoke_session(&app_state, &user.token).await {
        warn!(error = %e, "Failed to revoke session");
        return ErrorResponse::internal(messages::SERVER_ERROR).into_response();
    }
    info!("Signed out successfully");
    Json(MessageResponse {
        success: true,
        message: messages::LOGGED_OUT.into(),
    })
    .into_response()
}
