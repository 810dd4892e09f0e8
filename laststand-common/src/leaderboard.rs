use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which personal best a leaderboard is ranked by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaderboardKind {
    #[default]
    Survival,
    Level,
    Kills,
}

impl LeaderboardKind {
    /// The `users` column this board is sorted by.
    pub fn sort_column(&self) -> &'static str {
        match self {
            LeaderboardKind::Survival => "longest_survival_time",
            LeaderboardKind::Level => "highest_level",
            LeaderboardKind::Kills => "most_kills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub longest_survival_time: i64,
    pub highest_level: i64,
    pub most_kills: i64,
    pub total_games_played: i64,
}
