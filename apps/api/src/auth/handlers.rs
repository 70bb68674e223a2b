use axum::{extract::State, http::StatusCode, Json};

use crate::auth::extractors::AuthUser;
use crate::auth::service::{self, AuthSession, Credentials, RegisterRequest};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthSession>, AppError> {
    let session = service::login(&state.store, &state.latency, &credentials).await?;
    Ok(Json(session))
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthSession>), AppError> {
    let session = service::register(&state.store, &state.latency, &request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/auth/session
pub async fn handle_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = service::validate_token(&state.store, &state.latency, &auth.token).await?;
    Ok(Json(user))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(State(state): State<AppState>, auth: AuthUser) -> StatusCode {
    service::logout(&state.store, &auth.token).await;
    StatusCode::NO_CONTENT
}
