mod rate_limiter;

use sa_db::SqlitePool;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// In-memory store with the schema applied
pub(crate) async fn create_test_pool() -> SqlitePool {
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
