//! Account directory: storage of user records keyed by username.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{NewUser, User};

/// Persistence boundary for user accounts. Implementations serialize
/// conflicting writes themselves (row locks, a mutex, ...).
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Insert a new account. A taken username is `AppError::DuplicateUsername`.
    async fn create(&self, user: NewUser) -> AppResult<Uuid>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Rewrite the mutable fields of the account with `user.username`.
    async fn update(&self, user: &User) -> AppResult<()>;
}
