//! Minimal user-account service built with Rust.
//!
//! Signup with salted PBKDF2 password hashes, login issuing HS256 bearer
//! tokens, and balance lookup gated on token validation.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;
pub use services::AuthService;

use std::sync::Arc;

use axum::routing::{get, post};
use handlers::http;

/// Build the API router (account routes, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let user_routes = axum::Router::new()
        .route("/signup", post(auth::signup))
        .route("/authenticate", post(auth::authenticate))
        .route("/balance", post(auth::balance));

    axum::Router::new()
        .route("/health", get(http::health))
        .nest("/api/user", user_routes)
        .with_state(state)
}

/// Wire the auth service around an account directory using `config`.
pub fn build_state(
    config: &Config,
    directory: Arc<dyn db::AccountDirectory>,
) -> error::AppResult<AppState> {
    let hasher = auth::PasswordHasher::new();
    let tokens = auth::TokenService::new(config)?;
    Ok(AppState::new(AuthService::new(directory, hasher, tokens)))
}
