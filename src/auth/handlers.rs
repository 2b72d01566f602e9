//! Account HTTP handlers: signup, authenticate, balance.

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::BearerToken;
use crate::services::{Login, SignUp};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub device: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub ip_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    pub first_name: String,
    pub last_name: String,
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BalanceRequest {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// POST /api/user/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequest>,
) -> Result<StatusCode, AppError> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    state
        .auth_service()
        .sign_up(SignUp {
            username: body.username,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            device: body.device,
            ip_address: body.ip_address,
        })
        .await?;
    Ok(StatusCode::OK)
}

/// POST /api/user/authenticate
pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequest>,
) -> Result<Json<AuthenticateResponse>, AppError> {
    let outcome = state
        .auth_service()
        .authenticate(Login {
            username: body.username,
            password: body.password,
            ip_address: body.ip_address,
            device: body.device,
            browser: body.browser,
        })
        .await?;

    Ok(Json(AuthenticateResponse {
        first_name: outcome.first_name,
        last_name: outcome.last_name,
        token: outcome.token,
    }))
}

/// POST /api/user/balance. Token comes from the body, or the bearer header when the body has none.
pub async fn balance(
    State(state): State<AppState>,
    BearerToken(header_token): BearerToken,
    Json(body): Json<BalanceRequest>,
) -> Result<Json<BalanceResponse>, AppError> {
    let token = if body.token.is_empty() {
        header_token.unwrap_or_default()
    } else {
        body.token
    };
    let balance = state.auth_service().balance(&token).await?;
    Ok(Json(BalanceResponse { balance }))
}
