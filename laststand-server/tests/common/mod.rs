#![allow(dead_code)]

use axum_test::TestServer;
use bon::builder;
use laststand_server::{
    app::{create_router, AppState},
    config::{Config, DatabaseConfig, IN_MEMORY_DATABASE_URL},
    data::pool,
};
use serde_json::{json, Value};

/// Test configuration for integration tests
pub struct TestContext {
    pub config: Config,
    pub server: TestServer,
    pub app_state: AppState,
}

/// Every context gets its own private in-memory database.
#[builder]
pub async fn test_context(#[builder(default = 30)] session_ttl_days: u32) -> TestContext {
    let config = Config {
        database: DatabaseConfig {
            url: IN_MEMORY_DATABASE_URL.to_string(),
            max_connections: 1,
        },
        port: 0,
        host: "127.0.0.1".parse().unwrap(),
        shutdown_timeout_seconds: 5,
        session_ttl_days,
    };

    let db = pool::create_pool(&config.database).await.expect("in-memory pool");
    pool::run_migrations(&db).await.expect("Failed to run database migrations");

    let app_state = AppState::new(config.clone(), db);
    let router = create_router(app_state.clone());

    TestContext {
        server: TestServer::new(router).unwrap(),
        app_state,
        config,
    }
}

/// Register an account and return its bearer token.
pub async fn register(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": username, "password": password }))
        .await;
    assert_eq!(response.status_code(), 200, "register {username}: {}", response.text());
    let body: Value = response.json();
    body["token"].as_str().expect("token in register response").to_string()
}
