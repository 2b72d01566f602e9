//! In-process account directory for tests and `DATABASE_URL=memory`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::AccountDirectory;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

#[derive(Default)]
pub struct MemoryAccountDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop an account. Not part of the directory contract; lets tests
    /// simulate an account removed after a token was issued.
    pub async fn remove(&self, username: &str) -> Option<User> {
        self.users.write().await.remove(username)
    }
}

#[async_trait]
impl AccountDirectory for MemoryAccountDirectory {
    async fn create(&self, user: NewUser) -> AppResult<Uuid> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(AppError::DuplicateUsername);
        }
        let id = Uuid::new_v4();
        users.insert(user.username.clone(), user.into_user(id));
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&user.username).ok_or(AppError::NotFound)?;
        // id and username are immutable
        stored.password_hash = user.password_hash.clone();
        stored.first_name = user.first_name.clone();
        stored.last_name = user.last_name.clone();
        stored.device = user.device.clone();
        stored.ip_address = user.ip_address.clone();
        stored.balance = user.balance;
        Ok(())
    }
}
