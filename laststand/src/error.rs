//! Error types for the simulation and the API client.

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Invalid save: {0}")]
    InvalidSave(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

pub type GameResult<T> = Result<T, GameError>;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not logged in")]
    NotAuthenticated,
}

pub type ClientResult<T> = Result<T, ClientError>;
