use serde::{Deserialize, Serialize};

use crate::{CharacterId, WeaponKind};

/// A run ends in victory after 30 minutes, so no real save is older than this.
pub const MAX_GAME_TIMER_MS: u64 = 30 * 60 * 1000;

/// Highest weapon level a save may carry.
pub const MAX_WEAPON_LEVEL: u32 = 99;

/// One equipped weapon inside a save slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponSave {
    #[serde(rename = "type")]
    pub kind: WeaponKind,
    pub level: u32,
}

/// A resumable snapshot of a run in progress.
///
/// `saved_at` is assigned by whoever persists the snapshot; the server ignores
/// the value a client sends and stamps its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    #[serde(default)]
    pub saved_at: i64,
    pub selected_character: CharacterId,
    pub player_level: u32,
    #[serde(rename = "currentXP")]
    pub current_xp: u32,
    #[serde(rename = "requiredXP")]
    pub required_xp: u32,
    pub kill_count: u32,
    /// Elapsed run time, in milliseconds.
    pub game_timer: u64,
    pub player_health: f32,
    pub player_max_health: f32,
    pub player_speed: f32,
    pub player_defense: f32,
    pub player_damage_multiplier: f32,
    pub weapons: Vec<WeaponSave>,
}

impl SaveData {
    /// Describes the first problem with the equipped weapons, if any.
    ///
    /// Each kind may be equipped once, at a level in `1..=MAX_WEAPON_LEVEL`.
    pub fn weapons_problem(&self) -> Option<String> {
        for (index, weapon) in self.weapons.iter().enumerate() {
            if !(1..=MAX_WEAPON_LEVEL).contains(&weapon.level) {
                return Some(format!("{} level must be between 1 and {MAX_WEAPON_LEVEL}", weapon.kind));
            }
            if self.weapons[..index].iter().any(|earlier| earlier.kind == weapon.kind) {
                return Some(format!("{} is equipped more than once", weapon.kind));
            }
        }
        None
    }
}
