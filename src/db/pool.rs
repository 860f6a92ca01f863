use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Connect to PostgreSQL with at most `max_connections` pooled connections
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    tracing::info!(max_connections, "Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .test_before_acquire(true)
        .connect(database_url)
        .await?;

    tracing::info!("PostgreSQL pool ready");

    Ok(pool)
}
