//! PostgreSQL connection pool for the account directory.

use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

use crate::error::AppResult;

pub type DbPool = sqlx::PgPool;

/// Open a pool and make sure the `users` table is reachable.
pub async fn create_pool(database_url: &str) -> AppResult<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    sqlx::query("SELECT 1 FROM users LIMIT 1")
        .execute(&pool)
        .await?;
    info!("account directory connected");
    Ok(pool)
}
