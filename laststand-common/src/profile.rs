use serde::{Deserialize, Serialize};

use crate::CharacterId;

/// Personal bests, each kept as a running maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScores {
    pub longest_survival_time: i64,
    pub highest_level: i64,
    pub most_kills: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub music_volume: f64,
    pub sfx_volume: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.7,
            sfx_volume: 0.8,
        }
    }
}

/// Everything the server knows about an account, as shown to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub created_at: i64,
    pub last_login: i64,
    pub total_playtime: i64,
    pub total_kills: i64,
    pub total_games_played: i64,
    pub high_scores: HighScores,
    pub unlocked_characters: Vec<String>,
    pub achievements: Vec<String>,
    pub settings: Settings,
}

/// A partial profile update. Absent fields are left alone.
///
/// Totals are added to the stored value, high scores keep the larger of the
/// two, settings are overwritten, and unlocks/achievements are inserted once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_playtime: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_kills: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_games_played: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longest_survival_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_kills: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfx_volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_character: Option<CharacterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_achievement: Option<String>,
}

impl ProfileUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
