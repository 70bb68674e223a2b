use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::service::resolve_token;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// Resolves the bearer token to the signed-in user.
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or_else(|| AppError::Unauthorized("Invalid auth scheme".to_string()))?
            .trim();

        let user = resolve_token(&state.store, token).await?;

        Ok(AuthUser {
            user,
            token: token.to_string(),
        })
    }
}
