use tracing::{debug, trace, warn};

use crate::app::AppState;
use crate::data::{self, session as session_repo};

/// Number of random bytes behind each bearer token; tokens are their hex encoding.
pub const TOKEN_BYTES: usize = 32;

/// A verified session remembered between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedSession {
    pub user_id: i64,
    pub expires_at: i64,
}

/// Generate an opaque, unguessable session token.
pub fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Open a new session for `user_id`, returning its token.
///
/// Expired sessions are swept from both the database and the cache first.
pub async fn create_session(state: &AppState, user_id: i64) -> Result<String, sqlx::Error> {
    let now = data::now_millis();

    match session_repo::purge_expired_sessions(&state.db, now).await {
        Ok(0) => {}
        Ok(purged) => debug!(purged, "Purged expired sessions"),
        Err(e) => warn!(error = %e, "Failed to purge expired sessions"),
    }
    state.sessions.retain(|_, cached| cached.expires_at > now);

    let token = generate_token();
    let expires_at = now + state.config.session_ttl_millis();
    session_repo::insert_session(&state.db, &token, user_id, now, expires_at).await?;
    trace!(user_id, expires_at, "Created session");
    Ok(token)
}

/// Resolve a bearer token to the user it belongs to.
///
/// Returns `None` for unknown and expired tokens alike.
pub async fn resolve_session(state: &AppState, token: &str) -> Result<Option<i64>, sqlx::Error> {
    let now = data::now_millis();

    let cached = state.sessions.get(token).map(|entry| *entry);
    if let Some(cached) = cached {
        if cached.expires_at > now {
            return Ok(Some(cached.user_id));
        }
        state.sessions.remove(token);
        trace!("Evicted expired session from cache");
    }

    let Some(row) = session_repo::find_live_session(&state.db, token, now).await? else {
        return Ok(None);
    };
    state.sessions.insert(
        row.token,
        CachedSession {
            user_id: row.user_id,
            expires_at: row.expires_at,
        },
    );
    Ok(Some(row.user_id))
}

/// End a session. Returns whether it existed.
pub async fn revoke_session(state: &AppState, token: &str) -> Result<bool, sqlx::Error> {
    state.sessions.remove(token);
    session_repo::delete_session(&state.db, token).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_64_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_tokens_do_not_repeat() {
        assert_ne!(generate_token(), generate_token());
    }
}
