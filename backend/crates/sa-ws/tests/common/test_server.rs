#![allow(dead_code)]

use sa_config::RateLimitConfig;
use sa_core::SessionState;
use sa_db::SqlitePool;
use sa_ws::{
    AlertDispatcher, AppState, BroadcastConfig, ChannelBroadcaster, ConnectionConfig,
    ConnectionLimits, ConnectionRegistry, Metrics, RateLimiterFactory, ShutdownCoordinator,
};

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_OWNER: &str = "test-owner";

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub max_connections_total: usize,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
    pub send_buffer_size: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            max_connections_total: 100,
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 60,
            send_buffer_size: ConnectionConfig::default().send_buffer_size,
        }
    }
}

impl TestServerConfig {
    /// Strict connection limits (for limit tests)
    pub fn with_strict_limits() -> Self {
        Self {
            max_connections_total: 2,
            ..Default::default()
        }
    }

    /// Tiny per-connection send buffer (for burst tests)
    pub fn with_small_send_buffer(send_buffer_size: usize) -> Self {
        Self {
            send_buffer_size,
            ..Default::default()
        }
    }

    /// Strict rate limits (for rate limit tests)
    pub fn with_strict_rate_limits() -> Self {
        Self {
            rate_limit_max_requests: 2,
            rate_limit_window_secs: 60,
            ..Default::default()
        }
    }
}

/// Test server with access to AppState and its store
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
    pub pool: SqlitePool,
}

pub async fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default()).await
}

pub async fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let pool = create_test_pool().await;
    let (app, app_state) = create_app(config, pool.clone());
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState {
        server,
        app_state,
        pool,
    }
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

fn create_app(config: TestServerConfig, pool: SqlitePool) -> (Router, AppState) {
    let metrics = Metrics::default();
    let broadcaster = ChannelBroadcaster::new(BroadcastConfig::default());
    let dispatcher = AlertDispatcher::new(pool, broadcaster.clone(), metrics.clone());

    let app_state = AppState {
        session: SessionState::new(TEST_OWNER),
        dispatcher,
        broadcaster,
        rate_limiter_factory: RateLimiterFactory::new(RateLimitConfig {
            max_requests: config.rate_limit_max_requests,
            window_secs: config.rate_limit_window_secs,
        }),
        registry: ConnectionRegistry::new(ConnectionLimits {
            max_total: config.max_connections_total,
        }),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig {
            send_buffer_size: config.send_buffer_size,
            ..ConnectionConfig::default()
        },
    };

    let router = Router::new()
        .route("/ws", get(sa_ws::handler))
        .with_state(app_state.clone());

    (router, app_state)
}
