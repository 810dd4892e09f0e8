use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::warn;

use crate::{app::AppState, data::pool};

#[derive(Debug, Serialize)]
struct HealthResponse {
    success: bool,
    ok: bool,
    database: bool,
}

pub async fn health_handler(State(app_state): State<AppState>) -> axum::response::Response {
    let database = match pool::ping(&app_state.db).await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Health check could not reach the database");
            false
        }
    };
    let status = if database { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    let body = HealthResponse {
        success: database,
        ok: database,
        database,
    };
    (status, Json(body)).into_response()
}
