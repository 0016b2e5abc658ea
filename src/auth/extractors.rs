use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use super::jwt::JwtKeys;
use crate::accounts::policy::Caller;

/// Extracts and validates the bearer JWT, yielding the caller identity.
pub struct AuthUser(pub Caller);

fn unauthorized(msg: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg })))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| unauthorized("Invalid Authorization header"))?;

        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser(Caller {
            id: claims.sub,
            is_admin: claims.is_admin,
        }))
    }
}
