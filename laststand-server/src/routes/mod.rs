use axum::extract::rejection::JsonRejection;
use axum::Json;
use tracing::debug;

use crate::errors::{messages, ErrorResponse};

pub mod auth;
pub mod health;
pub mod leaderboard;
pub mod profile;
pub mod save;

/// Unwrap a JSON body, answering malformed or non-JSON bodies with a 400.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ErrorResponse> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Rejected request body");
        ErrorResponse::bad_request(messages::INVALID_BODY)
    })
}
