use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::errors::{messages, ErrorResponse};
use crate::{app::AppState, session};

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 4;

/// Hex-encoded SHA-256 of the password, the format stored in `users.password_hash`.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Compare a password against a stored hash without short-circuiting on the first mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let candidate = hash_password(password);
    if candidate.len() != stored_hash.len() {
        return false;
    }
    candidate
        .bytes()
        .zip(stored_hash.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// The account behind a valid bearer token.
///
/// Rejects with 401 when the header is missing, malformed, unknown or expired.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub token: String,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            debug!("Missing or malformed bearer token");
            return Err(ErrorResponse::unauthorized(messages::AUTH_REQUIRED));
        };

        match session::resolve_session(state, token).await {
            Ok(Some(user_id)) => Ok(AuthenticatedUser {
                user_id,
                token: token.to_string(),
            }),
            Ok(None) => {
                debug!("Unknown or expired session token");
                Err(ErrorResponse::unauthorized(messages::AUTH_REQUIRED))
            }
            Err(e) => {
                warn!(error = %e, "Failed to look up session");
                Err(ErrorResponse::internal(messages::SERVER_ERROR))
            }
        }
    }
}
