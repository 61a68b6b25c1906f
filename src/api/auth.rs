//! Basic-credential resolution of the acting member.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::AppState;
use crate::domain::aggregates::Member;
use crate::store::{Store, StoreTx};
use crate::CommerceError;

/// Member resolved from the request's `Authorization: Basic` header.
pub struct AuthMember(pub Member);

#[async_trait]
impl<S: Store> FromRequestParts<AppState<S>> for AuthMember {
    type Rejection = CommerceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> crate::Result<Self> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(CommerceError::Unauthorized)?;
        let encoded = header.strip_prefix("Basic ").ok_or(CommerceError::Unauthorized)?;
        let decoded = STANDARD.decode(encoded).map_err(|_| CommerceError::Unauthorized)?;
        let decoded = String::from_utf8(decoded).map_err(|_| CommerceError::Unauthorized)?;
        let (email, password) = decoded.split_once(':').ok_or(CommerceError::Unauthorized)?;

        let mut tx = state.store.begin().await?;
        let member = tx
            .member_by_credentials(email, password)
            .await?
            .ok_or(CommerceError::Unauthorized)?;
        Ok(AuthMember(member))
    }
}
