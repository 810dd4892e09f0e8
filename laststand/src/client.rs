//! Async client for the Last Stand HTTP API.

use laststand_common::{
    api::{ApiFailure, AuthResponse, Credentials, LeaderboardResponse, LoadResponse, MessageResponse, ProfileResponse, SaveResponse},
    LeaderboardEntry, LeaderboardKind, ProfileUpdate, SaveData, UserProfile,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{ClientError, ClientResult};

/// Holds the bearer token issued by `register` or `login` and attaches it to account-scoped calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("laststand/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    fn authorized(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Decode a success body, or surface the server's `{success:false,error}` message.
    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ApiFailure>().await {
            Ok(failure) => failure.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        debug!(status = status.as_u16(), %message, "API call failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    #[instrument(skip(self, password))]
    pub async fn register(&mut self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        self.authenticate("/api/auth/register", username, password).await
    }

    #[instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        self.authenticate("/api/auth/login", username, password).await
    }

    async fn authenticate(&mut self, path: &str, username: &str, password: &str) -> ClientResult<AuthResponse> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.request(Method::POST, path).json(&credentials).send().await?;
        let auth: AuthResponse = Self::decode(response).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Revokes the current token; the client is logged out even if the server call fails.
    pub async fn logout(&mut self) -> ClientResult<MessageResponse> {
        let request = self.authorized(Method::POST, "/api/auth/logout")?;
        self.token = None;
        Self::decode(request.send().await?).await
    }

    pub async fn profile(&self) -> ClientResult<UserProfile> {
        let response = self.authorized(Method::GET, "/api/user/profile")?.send().await?;
        Ok(Self::decode::<ProfileResponse>(response).await?.profile)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<UserProfile> {
        let response = self
            .authorized(Method::PUT, "/api/user/profile")?
            .json(update)
            .send()
            .await?;
        Ok(Self::decode::<ProfileResponse>(response).await?.profile)
    }

    /// Stores `save` in the account's slot and returns the server's `savedAt` stamp.
    pub async fn save_game(&self, save: &SaveData) -> ClientResult<i64> {
        let response = self.authorized(Method::POST, "/api/game/save")?.json(save).send().await?;
        Ok(Self::decode::<SaveResponse>(response).await?.saved_at)
    }

    pub async fn load_game(&self) -> ClientResult<Option<SaveData>> {
        let response = self.authorized(Method::GET, "/api/game/save")?.send().await?;
        Ok(Self::decode::<LoadResponse>(response).await?.save)
    }

    pub async fn delete_save(&self) -> ClientResult<()> {
        let response = self.authorized(Method::DELETE, "/api/game/save")?.send().await?;
        Self::decode::<MessageResponse>(response).await.map(|_| ())
    }

    /// Public; no token needed.
    pub async fn leaderboard(&self, kind: LeaderboardKind, limit: Option<u32>) -> ClientResult<Vec<LeaderboardEntry>> {
        let mut query = vec![("type", kind.to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let response = self
            .request(Method::GET, "/api/game/leaderboard")
            .query(&query)
            .send()
            .await?;
        Ok(Self::decode::<LeaderboardResponse>(response).await?.leaderboard)
    }
}
