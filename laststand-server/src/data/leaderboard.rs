use laststand_common::{LeaderboardEntry, LeaderboardKind};
use sqlx::FromRow;

use crate::data::pool::DbPool;

#[derive(Debug, Clone, FromRow)]
struct LeaderboardRow {
    username: String,
    longest_survival_time: i64,
    highest_level: i64,
    most_kills: i64,
    total_games_played: i64,
}

/// Top `limit` players by the board's sort column. Players who never scored on
/// that column are left out; ties go to the older account.
pub async fn top_players(pool: &DbPool, kind: LeaderboardKind, limit: u32) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
    let column = kind.sort_column();
    let rows = sqlx::query_as::<_, LeaderboardRow>(&format!(
        r#"
        SELECT username, longest_survival_time, highest_level, most_kills, total_games_played
        FROM users
        WHERE {column} > 0
        ORDER BY {column} DESC, id ASC
        LIMIT ?
        "#
    ))
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .zip(1u32..)
        .map(|(row, rank)| LeaderboardEntry {
            rank,
            username: row.username,
            longest_survival_time: row.longest_survival_time,
            highest_level: row.highest_level,
            most_kills: row.most_kills,
            total_games_played: row.total_games_played,
        })
        .collect())
}
