//! Account workflows: signup, authenticate, balance lookup.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::auth::{PasswordHasher, TokenService, DUMMY_HASH};
use crate::db::AccountDirectory;
use crate::error::{AppError, AppResult};
use crate::models::NewUser;

/// Credit granted on the first login of an account whose balance is still zero.
pub const FIRST_LOGIN_CREDIT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

#[derive(Debug, Clone, Default)]
pub struct SignUp {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub device: String,
    pub ip_address: String,
}

#[derive(Debug, Clone, Default)]
pub struct Login {
    pub username: String,
    pub password: String,
    pub ip_address: Option<String>,
    pub device: Option<String>,
    pub browser: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub first_name: String,
    pub last_name: String,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn AccountDirectory>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Self {
        Self {
            directory,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    #[instrument(skip(self, req), fields(username = %req.username))]
    pub async fn sign_up(&self, req: SignUp) -> AppResult<()> {
        let password_hash = self.hasher.hash(&req.password)?;
        let id = self
            .directory
            .create(NewUser {
                username: req.username,
                password_hash,
                first_name: req.first_name,
                last_name: req.last_name,
                device: req.device,
                ip_address: req.ip_address,
                balance: Decimal::ZERO,
            })
            .await?;
        info!(user_id = %id, "account created");
        Ok(())
    }

    /// Verify credentials and issue a token. Unknown user and wrong password
    /// produce the same `InvalidCredentials`.
    #[instrument(skip(self, req), fields(username = %req.username))]
    pub async fn authenticate(&self, req: Login) -> AppResult<LoginOutcome> {
        let found = self.directory.find_by_username(&req.username).await?;
        // Unknown users still pay one derivation so timing does not reveal them.
        let stored_hash = found
            .as_ref()
            .map_or(DUMMY_HASH, |u| u.password_hash.as_str());
        let matched = self.hasher.verify(&req.password, stored_hash)?;
        let mut user = match found {
            Some(u) if matched => u,
            _ => {
                warn!("invalid credentials");
                return Err(AppError::InvalidCredentials);
            }
        };

        let mut dirty = false;
        // Read-then-write: two concurrent first logins may both grant.
        if user.balance.is_zero() {
            user.balance = FIRST_LOGIN_CREDIT;
            dirty = true;
        }
        if let Some(ip) = req.ip_address.filter(|s| !s.is_empty()) {
            if ip != user.ip_address {
                user.ip_address = ip;
                dirty = true;
            }
        }
        if let Some(device) = req.device.filter(|s| !s.is_empty()) {
            if device != user.device {
                user.device = device;
                dirty = true;
            }
        }
        if dirty {
            self.directory.update(&user).await?;
        }

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, browser = ?req.browser, "authenticated");
        Ok(LoginOutcome {
            first_name: user.first_name,
            last_name: user.last_name,
            token,
        })
    }

    #[instrument(skip_all)]
    pub async fn balance(&self, token: &str) -> AppResult<Decimal> {
        if !self.tokens.validate(token) {
            return Err(AppError::Unauthorized);
        }
        let username = self
            .tokens
            .extract_username(token)
            .ok_or(AppError::Unauthorized)?;
        let user = self
            .directory
            .find_by_username(&username)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(user.balance)
    }
}
