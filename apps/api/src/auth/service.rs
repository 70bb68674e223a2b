//! Mock authentication. Tokens are opaque strings ending in the user id; a token is
//! accepted only while it is recorded in local storage.

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::latency::{Latency, Operation};
use crate::models::user::{User, UserRow};
use crate::store::local_storage::auth_token_key;
use crate::store::{Repository, Store};

const TOKEN_PREFIX: &str = "mock-jwt-token-";

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid");
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

pub fn token_for(user_id: u64) -> String {
    format!("{TOKEN_PREFIX}{user_id}")
}

fn user_id_from_token(token: &str) -> Option<u64> {
    token.rsplit('-').next()?.parse().ok()
}

pub async fn login(
    store: &Store,
    latency: &Latency,
    credentials: &Credentials,
) -> Result<AuthSession, AppError> {
    latency.simulate(Operation::Login).await;

    let email = credentials.email.trim();
    let user = store
        .users
        .filter(&|u: &UserRow| u.email == email && u.password == credentials.password)
        .await
        .into_iter()
        .next();

    let Some(user) = user else {
        warn!("Rejected login for {email}");
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    };

    let session = open_session(store, &user).await?;
    info!("User {} logged in", user.id);
    Ok(session)
}

pub async fn register(
    store: &Store,
    latency: &Latency,
    request: &RegisterRequest,
) -> Result<AuthSession, AppError> {
    latency.simulate(Operation::Register).await;

    let email = request.email.trim();
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("Password cannot be empty".to_string()));
    }

    let user = UserRow {
        id: store.next_id(),
        email: email.to_string(),
        password: request.password.clone(),
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        created_at: Utc::now(),
    };
    let user = store
        .users
        .insert_if_absent(user, &|u: &UserRow| u.email == email)
        .await
        .map_err(|_| AppError::Conflict("User already exists with this email".to_string()))?;
    info!("Registered user {}", user.id);

    open_session(store, &user).await
}

/// Validates a token and returns its user. Backs the session check endpoint.
pub async fn validate_token(
    store: &Store,
    latency: &Latency,
    token: &str,
) -> Result<User, AppError> {
    latency.simulate(Operation::ValidateToken).await;
    resolve_token(store, token).await
}

/// Token lookup without simulated latency. Used by the request extractor.
pub async fn resolve_token(store: &Store, token: &str) -> Result<User, AppError> {
    let invalid = || AppError::Unauthorized("Invalid token".to_string());

    if store
        .local_storage
        .get_item(&auth_token_key(token))
        .await
        .is_none()
    {
        return Err(invalid());
    }

    let user_id = user_id_from_token(token).ok_or_else(invalid)?;
    let user = store.users.get(user_id).await.ok_or_else(invalid)?;
    Ok(User::from(&user))
}

/// Forgets a token. Returns false if it was not recorded.
pub async fn logout(store: &Store, token: &str) -> bool {
    let removed = store.local_storage.remove_item(&auth_token_key(token)).await;
    if removed {
        info!("Session closed");
    }
    removed
}

async fn open_session(store: &Store, user: &UserRow) -> Result<AuthSession, AppError> {
    let token = token_for(user.id);
    store
        .local_storage
        .set_json(&auth_token_key(&token), &user.id)
        .await?;
    Ok(AuthSession {
        user: User::from(user),
        token,
    })
}
