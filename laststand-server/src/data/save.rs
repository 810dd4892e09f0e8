use laststand_common::{CharacterId, SaveData, WeaponSave};
use sqlx::FromRow;
use tracing::warn;

use crate::data::pool::DbPool;

#[derive(Debug, Clone, FromRow)]
pub struct SaveRow {
    pub saved_at: i64,
    pub selected_character: String,
    pub player_level: i64,
    pub current_xp: i64,
    pub required_xp: i64,
    pub kill_count: i64,
    pub game_timer: i64,
    pub player_health: f64,
    pub player_max_health: f64,
    pub player_speed: f64,
    pub player_defense: f64,
    pub player_damage_multiplier: f64,
    pub weapons: String,
}

/// Errors that can occur while reading a save slot back out of the database.
#[derive(Debug, thiserror::Error)]
pub enum SaveReadError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// The row exists but no longer describes a valid run.
    #[error("corrupt save: {0}")]
    Corrupt(String),
}

impl TryFrom<SaveRow> for SaveData {
    type Error = SaveReadError;

    fn try_from(row: SaveRow) -> Result<Self, Self::Error> {
        let selected_character: CharacterId = row
            .selected_character
            .parse()
            .map_err(|_| SaveReadError::Corrupt(format!("unknown character '{}'", row.selected_character)))?;
        let weapons: Vec<WeaponSave> =
            serde_json::from_str(&row.weapons).map_err(|e| SaveReadError::Corrupt(format!("weapons column: {e}")))?;
        let unsigned = |value: i64, column: &str| {
            u32::try_from(value).map_err(|_| SaveReadError::Corrupt(format!("{column} out of range: {value}")))
        };

        Ok(SaveData {
            saved_at: row.saved_at,
            selected_character,
            player_level: unsigned(row.player_level, "player_level")?,
            current_xp: unsigned(row.current_xp, "current_xp")?,
            required_xp: unsigned(row.required_xp, "required_xp")?,
            kill_count: unsigned(row.kill_count, "kill_count")?,
            game_timer: u64::try_from(row.game_timer)
                .map_err(|_| SaveReadError::Corrupt(format!("game_timer out of range: {}", row.game_timer)))?,
            player_health: row.player_health as f32,
            player_max_health: row.player_max_health as f32,
            player_speed: row.player_speed as f32,
            player_defense: row.player_defense as f32,
            player_damage_multiplier: row.player_damage_multiplier as f32,
            weapons,
        })
    }
}

pub async fn find_save(pool: &DbPool, user_id: i64) -> Result<Option<SaveData>, SaveReadError> {
    let row = sqlx::query_as::<_, SaveRow>(
        r#"
        SELECT saved_at, selected_character, player_level, current_xp, required_xp, kill_count, game_timer,
               player_health, player_max_health, player_speed, player_defense, player_damage_multiplier, weapons
        FROM game_saves WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => SaveData::try_from(row).map(Some).inspect_err(|e| {
            warn!(user_id, error = %e, "Stored save could not be decoded");
        }),
        None => Ok(None),
    }
}

/// Replace the user's save slot with `save`, stamped with `saved_at`.
pub async fn upsert_save(pool: &DbPool, user_id: i64, save: &SaveData, saved_at: i64) -> Result<(), sqlx::Error> {
    let weapons = serde_json::to_string(&save.weapons).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query(
        r#"
        INSERT INTO game_saves (
            user_id, saved_at, selected_character, player_level, current_xp, required_xp, kill_count, game_timer,
            player_health, player_max_health, player_speed, player_defense, player_damage_multiplier, weapons
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id) DO UPDATE SET
            saved_at = excluded.saved_at,
            selected_character = excluded.selected_character,
            player_level = excluded.player_level,
            current_xp = excluded.current_xp,
            required_xp = excluded.required_xp,
            kill_count = excluded.kill_count,
            game_timer = excluded.game_timer,
            player_health = excluded.player_health,
            player_max_health = excluded.player_max_health,
            player_speed = excluded.player_speed,
            player_defense = excluded.player_defense,
            player_damage_multiplier = excluded.player_damage_multiplier,
            weapons = excluded.weapons
        "#,
    )
    .bind(user_id)
    .bind(saved_at)
    .bind(save.selected_character.as_ref())
    .bind(i64::from(save.player_level))
    .bind(i64::from(save.current_xp))
    .bind(i64::from(save.required_xp))
    .bind(i64::from(save.kill_count))
    .bind(i64::try_from(save.game_timer).unwrap_or(i64::MAX))
    .bind(f64::from(save.player_health))
    .bind(f64::from(save.player_max_health))
    .bind(f64::from(save.player_speed))
    .bind(f64::from(save.player_defense))
    .bind(f64::from(save.player_damage_multiplier))
    .bind(weapons)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns whether a save existed.
pub async fn delete_save(pool: &DbPool, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM game_saves WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
