//! Bearer token issue and validation (HS256 JWT).

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// Token lifetime. Fixed; clients may rely on it.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Identity claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub name: String,
    pub given_name: String,
    pub family_name: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Build from loaded config. An empty secret is a configuration error.
    pub fn new(config: &Config) -> AppResult<Self> {
        let secret = config.jwt_secret.as_bytes();
        if config.jwt_secret.trim().is_empty() {
            return Err(AppError::Config("JWT signing secret is empty".to_string()));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        })
    }

    pub fn issue(&self, user: &User) -> AppResult<String> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    pub fn issue_at(&self, user: &User, issued_at: DateTime<Utc>) -> AppResult<String> {
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.username.clone(),
            given_name: user.first_name.clone(),
            family_name: user.last_name.clone(),
            exp: (issued_at + self.ttl).timestamp(),
            iat: issued_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("jwt encode: {}", e)))
    }

    /// Signature and lifetime check. Never errors.
    pub fn validate(&self, token: &str) -> bool {
        self.verified_claims(token).is_ok()
    }

    /// Decode with full verification: HS256 signature, `exp` with zero leeway.
    pub fn verified_claims(&self, token: &str) -> AppResult<Claims> {
        if token.is_empty() {
            return Err(AppError::Unauthorized);
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(error = %e, "token rejected");
            AppError::Unauthorized
        })?;
        Ok(data.claims)
    }

    /// Read the `name` claim WITHOUT checking the signature or expiry.
    /// Only call this on a token that already passed [`TokenService::validate`].
    pub fn extract_username(&self, token: &str) -> Option<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();
        decode::<Claims>(token, &self.decoding, &validation)
            .ok()
            .map(|data| data.claims.name)
            .filter(|name| !name.is_empty())
    }
}
