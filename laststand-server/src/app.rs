use axum::{
    routing::{get, post},
    Router,
};
use dashmap::DashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::data::pool::DbPool;
use crate::{config::Config, routes, session::CachedSession};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Verified bearer tokens, keyed by token.
    pub sessions: Arc<DashMap<String, CachedSession>>,
    pub db: Arc<DbPool>,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(DashMap::new()),
            db: Arc::new(db),
        }
    }
}

/// Build the full API router around `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health_handler))
        .route("/api/auth/register", post(routes::auth::register_handler))
        .route("/api/auth/login", post(routes::auth::login_handler))
        .route("/api/auth/logout", post(routes::auth::logout_handler))
        .route(
            "/api/user/profile",
            get(routes::profile::get_profile_handler).put(routes::profile::update_profile_handler),
        )
        .route(
            "/api/game/save",
            get(routes::save::load_handler)
                .post(routes::save::save_handler)
                .delete(routes::save::delete_handler),
        )
        .route("/api/game/leaderboard", get(routes::leaderboard::leaderboard_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
