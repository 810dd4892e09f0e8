use laststand_common::{CharacterId, HighScores, ProfileUpdate, Settings, UserProfile};
use sqlx::{FromRow, SqliteExecutor};

use crate::data::pool::DbPool;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: i64,
    pub last_login: i64,
    pub total_playtime: i64,
    pub total_kills: i64,
    pub total_games_played: i64,
    pub longest_survival_time: i64,
    pub highest_level: i64,
    pub most_kills: i64,
    pub music_volume: f64,
    pub sfx_volume: f64,
}

const USER_COLUMNS: &str = "id, username, password_hash, created_at, last_login, total_playtime, total_kills, \
     total_games_played, longest_survival_time, highest_level, most_kills, music_volume, sfx_volume";

pub async fn find_user_by_username(pool: &DbPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a fresh account with zeroed statistics and default settings, and unlock
/// the starting chef for it. Both writes commit together.
pub async fn create_user(pool: &DbPool, username: &str, password_hash: &str, now: i64) -> Result<User, sqlx::Error> {
    let defaults = Settings::default();
    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (username, password_hash, created_at, last_login, music_volume, sfx_volume)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .bind(defaults.music_volume)
    .bind(defaults.sfx_volume)
    .fetch_one(&mut *tx)
    .await?;

    unlock_character(&mut *tx, user.id, CharacterId::default(), now).await?;

    tx.commit().await?;
    Ok(user)
}

pub async fn touch_last_login(pool: &DbPool, id: i64, now: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Unlocking an already unlocked chef is a no-op.
pub async fn unlock_character<'e, E>(executor: E, user_id: i64, character: CharacterId, now: i64) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("INSERT OR IGNORE INTO unlocked_characters (user_id, character_id, unlocked_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(character.as_ref())
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}

/// Recording an already earned achievement is a no-op.
pub async fn add_achievement<'e, E>(executor: E, user_id: i64, achievement_id: &str, now: i64) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("INSERT OR IGNORE INTO achievements (user_id, achievement_id, unlocked_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(achievement_id)
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}

/// Apply a partial update in one transaction.
///
/// Totals accumulate, high scores only ever grow, and volumes are overwritten.
pub async fn apply_profile_update(pool: &DbPool, user_id: i64, update: &ProfileUpdate, now: i64) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE users SET
            total_playtime = total_playtime + ?,
            total_kills = total_kills + ?,
            total_games_played = total_games_played + ?,
            longest_survival_time = MAX(longest_survival_time, COALESCE(?, longest_survival_time)),
            highest_level = MAX(highest_level, COALESCE(?, highest_level)),
            most_kills = MAX(most_kills, COALESCE(?, most_kills)),
            music_volume = COALESCE(?, music_volume),
            sfx_volume = COALESCE(?, sfx_volume)
        WHERE id = ?
        "#,
    )
    .bind(update.total_playtime.unwrap_or(0))
    .bind(update.total_kills.unwrap_or(0))
    .bind(update.total_games_played.unwrap_or(0))
    .bind(update.longest_survival_time)
    .bind(update.highest_level)
    .bind(update.most_kills)
    .bind(update.music_volume)
    .bind(update.sfx_volume)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if let Some(character) = update.unlock_character {
        unlock_character(&mut *tx, user_id, character, now).await?;
    }
    if let Some(achievement) = update.add_achievement.as_deref() {
        add_achievement(&mut *tx, user_id, achievement, now).await?;
    }

    tx.commit().await
}

/// Assemble the full profile view of an account, or `None` if it does not exist.
pub async fn load_profile(pool: &DbPool, user_id: i64) -> Result<Option<UserProfile>, sqlx::Error> {
    let Some(user) = find_user_by_id(pool, user_id).await? else {
        return Ok(None);
    };

    let unlocked_characters: Vec<String> = sqlx::query_scalar(
        "SELECT character_id FROM unlocked_characters WHERE user_id = ? ORDER BY unlocked_at, rowid",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let achievements: Vec<String> =
        sqlx::query_scalar("SELECT achievement_id FROM achievements WHERE user_id = ? ORDER BY unlocked_at, rowid")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    Ok(Some(UserProfile {
        username: user.username,
        created_at: user.created_at,
        last_login: user.last_login,
        total_playtime: user.total_playtime,
        total_kills: user.total_kills,
        total_games_played: user.total_games_played,
        high_scores: HighScores {
            longest_survival_time: user.longest_survival_time,
            highest_level: user.highest_level,
            most_kills: user.most_kills,
        },
        unlocked_characters,
        achievements,
        settings: Settings {
            music_volume: user.music_volume,
            sfx_volume: user.sfx_volume,
        },
    }))
}
