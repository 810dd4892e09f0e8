pub mod leaderboard;
pub mod pool;
pub mod save;
pub mod session;
pub mod user;

/// Current wall-clock time in epoch milliseconds, the unit every table stores.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
