//! Salted PBKDF2-HMAC-SHA256 password hashing.
//!
//! Stored format: base64(salt[16] || key[32]).

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::{AppError, AppResult};

pub const SALT_LEN: usize = 16;
pub const KEY_LEN: usize = 32;
const ENCODED_LEN: usize = SALT_LEN + KEY_LEN;

/// Stored hashes do not record their cost, so this must never change.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Well-formed hash that matches no password. Verified against when the
/// account does not exist so both failure paths pay one derivation.
pub const DUMMY_HASH: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn iterations() -> NonZeroU32 {
    NonZeroU32::new(PBKDF2_ITERATIONS).unwrap_or(NonZeroU32::MIN)
}

#[derive(Clone)]
pub struct PasswordHasher {
    rng: SystemRandom,
    derivations: Arc<AtomicU64>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
            derivations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Key derivations performed by this hasher and its clones.
    pub fn derivations(&self) -> u64 {
        self.derivations.load(Ordering::Relaxed)
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> AppResult<String> {
        let mut salt = [0u8; SALT_LEN];
        self.rng
            .fill(&mut salt)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("system RNG unavailable")))?;

        let mut key = [0u8; KEY_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations(),
            &salt,
            password.as_bytes(),
            &mut key,
        );
        self.derivations.fetch_add(1, Ordering::Relaxed);

        let mut out = [0u8; ENCODED_LEN];
        out[..SALT_LEN].copy_from_slice(&salt);
        out[SALT_LEN..].copy_from_slice(&key);
        Ok(STANDARD.encode(out))
    }

    /// Check `password` against an encoded hash. The key comparison is constant-time.
    pub fn verify(&self, password: &str, encoded: &str) -> AppResult<bool> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| AppError::MalformedHash)?;
        if bytes.len() != ENCODED_LEN {
            return Err(AppError::MalformedHash);
        }
        let (salt, stored_key) = bytes.split_at(SALT_LEN);

        // ring re-derives and compares in constant time.
        let matched = pbkdf2::verify(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations(),
            salt,
            password.as_bytes(),
            stored_key,
        )
        .is_ok();
        self.derivations.fetch_add(1, Ordering::Relaxed);
        Ok(matched)
    }
}
