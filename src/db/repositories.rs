//! PostgreSQL account directory.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::{AccountDirectory, DbPool};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

const USER_COLUMNS: &str =
    "id, username, password_hash, first_name, last_name, device, ip_address, balance";

#[derive(Clone)]
pub struct PgAccountDirectory {
    pool: DbPool,
}

impl PgAccountDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for PgAccountDirectory {
    async fn create(&self, user: NewUser) -> AppResult<Uuid> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO users (username, password_hash, first_name, last_name, device, ip_address, balance)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (username) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.device)
        .bind(&user.ip_address)
        .bind(user.balance)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| r.0).ok_or(AppError::DuplicateUsername)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let r = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $1, last_name = $2, password_hash = $3,
                device = $4, ip_address = $5, balance = $6
            WHERE username = $7
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(&user.device)
        .bind(&user.ip_address)
        .bind(user.balance)
        .bind(&user.username)
        .execute(&self.pool)
        .await?;
        if r.rows_affected() == 0 {
            debug!(username = %user.username, "update matched no rows");
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
