//! Bearer token extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

/// Token from an `Authorization: Bearer` header, if one was sent.
/// Extraction never fails; a missing or malformed header yields `None`.
#[derive(Clone, Debug, Default)]
pub struct BearerToken(pub Option<String>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header =
            <TypedHeader<Authorization<Bearer>> as FromRequestParts<S>>::from_request_parts(parts, state)
                .await
                .ok();
        Ok(BearerToken(
            header.map(|TypedHeader(Authorization(bearer))| bearer.token().to_string()),
        ))
    }
}
