#![allow(dead_code)]

//! Test infrastructure for sa-server HTTP tests

use sa_config::Config;
use sa_core::{EventAction, EventType, ServerMessage};
use sa_db::SqlitePool;
use sa_server::{build_app_state, build_router};
use sa_ws::AppState;

use axum_test::{TestServer, TestWebSocket};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_OWNER: &str = "test-owner";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// Full router over an in-memory store, owned by [`TEST_OWNER`]
pub async fn create_test_app() -> TestApp {
    let mut config = Config::default();
    config.server.owner_id = TEST_OWNER.to_string();

    let state = build_app_state(&config, create_test_pool().await);
    let server = TestServer::builder()
        .http_transport()
        .build(build_router(state.clone()))
        .expect("Failed to create test server");

    TestApp { server, state }
}

async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sa_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Store an enabled text action for `event_type` routed to the default channel
pub async fn create_text_action(state: &AppState, event_type: EventType, template: &str) {
    let mut action = EventAction::new(TEST_OWNER, event_type);
    action.text.enabled = true;
    action.text.template = template.to_string();
    state
        .dispatcher
        .actions()
        .create(&action)
        .await
        .expect("Failed to create action");
}

/// Connect a browser source on the default channel and consume its greeting
pub async fn connect_browser_source(server: &TestServer) -> TestWebSocket {
    let mut ws = server.get_websocket("/ws").await.into_websocket().await;
    let greeting: ServerMessage = ws.receive_json().await;
    assert!(matches!(greeting, ServerMessage::Connected { .. }));
    ws
}
