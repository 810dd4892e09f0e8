mod common;

use laststand_common::{
    api::{LoadResponse, SaveResponse},
    CharacterId, SaveData, WeaponKind, WeaponSave,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{register, test_context, TestContext};

fn sample_save() -> SaveData {
    SaveData {
        saved_at: 0,
        selected_character: CharacterId::FryChef,
        player_level: 7,
        current_xp: 11,
        required_xp: 29,
        kill_count: 213,
        game_timer: 412_345,
        player_health: 87.5,
        player_max_health: 135.0,
        player_speed: 162.0,
        player_defense: 13.0,
        player_damage_multiplier: 1.25,
        weapons: vec![
            WeaponSave {
                kind: WeaponKind::FryerOil,
                level: 1,
            },
            WeaponSave {
                kind: WeaponKind::CoffeeMachine,
                level: 3,
            },
        ],
    }
}

#[tokio::test]
async fn test_load_without_save_is_null() {
    let TestContext { server, .. } = test_context().call().await;
    let token = register(&server, "fresh", "password").await;

    let response = server.get("/api/game/save").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({ "success": true, "save": null }));
}

#[tokio::test]
async fn test_save_load_round_trip() {
    let TestContext { server, .. } = test_context().call().await;
    let token = register(&server, "saver", "password").await;
    let save = sample_save();

    let response = server
        .post("/api/game/save")
        .authorization_bearer(&token)
        .json(&save)
        .await;
    assert_eq!(response.status_code(), 200);
    let SaveResponse { message, saved_at, .. } = response.json();
    assert_eq!(message, "게임이 저장되었습니다");
    assert!(saved_at > 0);

    let LoadResponse { save: loaded, .. } = server.get("/api/game/save").authorization_bearer(&token).await.json();
    assert_eq!(loaded, Some(SaveData { saved_at, ..save }));
}

#[tokio::test]
async fn test_saving_replaces_previous_save() {
    let TestContext { server, app_state, .. } = test_context().call().await;
    let token = register(&server, "overwriter", "password").await;

    let first = sample_save();
    let second = SaveData {
        player_level: 12,
        game_timer: 900_000,
        weapons: vec![WeaponSave {
            kind: WeaponKind::Hamburger,
            level: 4,
        }],
        ..sample_save()
    };

    for save in [&first, &second] {
        let response = server.post("/api/game/save").authorization_bearer(&token).json(save).await;
        assert_eq!(response.status_code(), 200);
    }

    let LoadResponse { save: loaded, .. } = server.get("/api/game/save").authorization_bearer(&token).await.json();
    let loaded = loaded.expect("save present");
    assert_eq!(loaded.player_level, 12);
    assert_eq!(loaded.weapons, second.weapons);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM game_saves")
        .fetch_one(&*app_state.db)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_saves_are_private() {
    let TestContext { server, .. } = test_context().call().await;
    let alice = register(&server, "alice", "password").await;
    let bob = register(&server, "bob", "password").await;

    server.post("/api/game/save").authorization_bearer(&alice).json(&sample_save()).await;

    let LoadResponse { save, .. } = server.get("/api/game/save").authorization_bearer(&bob).await.json();
    assert_eq!(save, None);
}

#[tokio::test]
async fn test_delete_save() {
    let TestContext { server, .. } = test_context().call().await;
    let token = register(&server, "quitter", "password").await;
    server.post("/api/game/save").authorization_bearer(&token).json(&sample_save()).await;

    let response = server.delete("/api/game/save").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "저장된 게임이 삭제되었습니다");

    let LoadResponse { save, .. } = server.get("/api/game/save").authorization_bearer(&token).await.json();
    assert_eq!(save, None);

    // Deleting again is still a success
    let response = server.delete("/api/game/save").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_invalid_saves_are_rejected() {
    let TestContext { server, .. } = test_context().call().await;
    let token = register(&server, "broken", "password").await;

    let overhealed = SaveData {
        player_health: 500.0,
        ..sample_save()
    };
    let response = server.post("/api/game/save").authorization_bearer(&token).json(&overhealed).await;
    assert_eq!(response.status_code(), 400);

    let doubled = SaveData {
        weapons: vec![
            WeaponSave {
                kind: WeaponKind::FryerOil,
                level: 2,
            };
            2
        ],
        ..sample_save()
    };
    let overleveled = SaveData {
        weapons: vec![WeaponSave {
            kind: WeaponKind::CoffeeMachine,
            level: u32::MAX,
        }],
        ..sample_save()
    };
    let endless = SaveData {
        game_timer: u64::MAX,
        ..sample_save()
    };
    for save in [doubled, overleveled, endless] {
        let response = server.post("/api/game/save").authorization_bearer(&token).json(&save).await;
        assert_eq!(response.status_code(), 400);
    }
    let LoadResponse { save, .. } = server.get("/api/game/save").authorization_bearer(&token).await.json();
    assert_eq!(save, None);

    let response = server
        .post("/api/game/save")
        .authorization_bearer(&token)
        .json(&json!({ "selectedCharacter": "rookie" }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid request body");

    let response = server.post("/api/game/save").json(&sample_save()).await;
    assert_eq!(response.status_code(), 401);
}
