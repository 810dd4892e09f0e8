//! Wire types shared by the game client and the API server.
//!
//! Every type here serializes to the camelCase JSON the browser build speaks,
//! so the same structs travel over HTTP, land in the database, and come back
//! out of a save slot unchanged.

pub mod api;
pub mod ids;
pub mod leaderboard;
pub mod profile;
pub mod save;

pub use ids::{CharacterId, WeaponKind};
pub use leaderboard::{LeaderboardEntry, LeaderboardKind};
pub use profile::{HighScores, ProfileUpdate, Settings, UserProfile};
pub use save::{SaveData, WeaponSave, MAX_GAME_TIMER_MS, MAX_WEAPON_LEVEL};
