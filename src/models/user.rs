//! User account entity.

use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted user account. `username` is the unique, case-sensitive key.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Encoded `salt || key`, never the raw password.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Last-seen client device. Advisory only.
    pub device: String,
    /// Last-seen client IP. Advisory only.
    pub ip_address: String,
    pub balance: Decimal,
}

/// Insert payload for a new account; the directory assigns `id`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub device: String,
    pub ip_address: String,
    pub balance: Decimal,
}

impl NewUser {
    /// Attach an assigned id, producing the stored entity.
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            device: self.device,
            ip_address: self.ip_address,
            balance: self.balance,
        }
    }
}
