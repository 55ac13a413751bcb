//! Authenticated principal extraction
//!
//! Authentication itself happens upstream; the gateway injects the resolved
//! principal as `x-user-id` / `x-user-role` headers. Requests without a
//! valid pair are rejected with 401 before any handler runs.

use crate::error::AppError;
use crate::models::Role;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The already-authenticated requester
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or_else(|| {
                AppError::Authentication("Missing or invalid user identity".to_string())
            })?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Role>().ok())
            .ok_or_else(|| AppError::Authentication("Missing or invalid user role".to_string()))?;

        Ok(AuthUser { id, role })
    }
}
