mod common;

use laststand_common::api::ProfileResponse;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{register, test_context, TestContext};

#[tokio::test]
async fn test_new_profile_defaults() {
    let TestContext { server, .. } = test_context().call().await;
    let token = register(&server, "newbie", "password").await;

    let response = server.get("/api/user/profile").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), 200);

    let ProfileResponse { success, profile, .. } = response.json();
    assert!(success);
    assert_eq!(profile.username, "newbie");
    assert_eq!(profile.total_playtime, 0);
    assert_eq!(profile.total_games_played, 0);
    assert_eq!(profile.high_scores.longest_survival_time, 0);
    assert_eq!(profile.unlocked_characters, vec!["rookie".to_string()]);
    assert!(profile.achievements.is_empty());
    assert_eq!(profile.settings.music_volume, 0.7);
    assert_eq!(profile.settings.sfx_volume, 0.8);
    assert_eq!(profile.created_at, profile.last_login);
}

#[tokio::test]
async fn test_profile_update_semantics() {
    let TestContext { server, .. } = test_context().call().await;
    let token = register(&server, "grinder", "password").await;

    let first = json!({
        "totalPlaytime": 120000,
        "totalKills": 40,
        "totalGamesPlayed": 1,
        "longestSurvivalTime": 120000,
        "highestLevel": 6,
        "mostKills": 40,
        "musicVolume": 0.25
    });
    let second = json!({
        "totalPlaytime": 60000,
        "totalKills": 15,
        "totalGamesPlayed": 1,
        "longestSurvivalTime": 60000,
        "highestLevel": 9,
        "mostKills": 15,
        "unlockCharacter": "lineChef",
        "addAchievement": "first_blood"
    });

    for update in [first, second] {
        let response = server
            .put("/api/user/profile")
            .authorization_bearer(&token)
            .json(&update)
            .await;
        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["message"], "프로필이 업데이트되었습니다");
    }

    let ProfileResponse { profile, .. } = server.get("/api/user/profile").authorization_bearer(&token).await.json();

    // Totals accumulate
    assert_eq!(profile.total_playtime, 180000);
    assert_eq!(profile.total_kills, 55);
    assert_eq!(profile.total_games_played, 2);
    // High scores keep the best
    assert_eq!(profile.high_scores.longest_survival_time, 120000);
    assert_eq!(profile.high_scores.highest_level, 9);
    assert_eq!(profile.high_scores.most_kills, 40);
    // Settings are overwritten only when present
    assert_eq!(profile.settings.music_volume, 0.25);
    assert_eq!(profile.settings.sfx_volume, 0.8);
    assert_eq!(profile.unlocked_characters, vec!["rookie".to_string(), "lineChef".to_string()]);
    assert_eq!(profile.achievements, vec!["first_blood".to_string()]);
}

#[tokio::test]
async fn test_unlocks_and_achievements_are_idempotent() {
    let TestContext { server, .. } = test_context().call().await;
    let token = register(&server, "collector", "password").await;

    for _ in 0..3 {
        let response = server
            .put("/api/user/profile")
            .authorization_bearer(&token)
            .json(&json!({ "unlockCharacter": "rookie", "addAchievement": "survivor" }))
            .await;
        assert_eq!(response.status_code(), 200);
    }

    let ProfileResponse { profile, .. } = server.get("/api/user/profile").authorization_bearer(&token).await.json();
    assert_eq!(profile.unlocked_characters, vec!["rookie".to_string()]);
    assert_eq!(profile.achievements, vec!["survivor".to_string()]);
}

#[tokio::test]
async fn test_invalid_profile_updates_are_rejected() {
    let TestContext { server, .. } = test_context().call().await;
    let token = register(&server, "cheater", "password").await;

    let cases = [
        json!({ "totalKills": -100 }),
        json!({ "musicVolume": 3.0 }),
        json!({ "unlockCharacter": "dishwasher" }),
        json!({ "highestLevel": "ninety" }),
    ];
    for payload in cases {
        let response = server
            .put("/api/user/profile")
            .authorization_bearer(&token)
            .json(&payload)
            .await;
        assert_eq!(response.status_code(), 400, "payload {payload}");
    }

    let ProfileResponse { profile, .. } = server.get("/api/user/profile").authorization_bearer(&token).await.json();
    assert_eq!(profile.total_kills, 0);
    assert_eq!(profile.settings.music_volume, 0.7);
}

#[tokio::test]
async fn test_deleted_user_profile_is_404() {
    let TestContext { server, app_state, .. } = test_context().call().await;
    let token = register(&server, "ghost", "password").await;

    // Prime the session cache so the token outlives the cascade-deleted session row
    let response = server.get("/api/user/profile").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), 200);

    sqlx::query("DELETE FROM users WHERE username = 'ghost'")
        .execute(&*app_state.db)
        .await
        .unwrap();

    let response = server.get("/api/user/profile").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "사용자를 찾을 수 없습니다");
}
