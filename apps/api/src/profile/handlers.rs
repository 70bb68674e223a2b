use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::auth::extractors::AuthUser;
use crate::errors::AppError;
use crate::models::profile::{
    Certification, Education, Experience, Profile, ProfileEntry, ProfileUpdate, Project, Section,
};
use crate::profile::completeness::{compute_completion, CompletionReport};
use crate::profile::service;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub completion: CompletionReport,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let completion = compute_completion(&profile);
        Self {
            profile,
            completion,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub skill: String,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = service::get_profile(&state.store, &state.latency, auth.user.id).await?;
    Ok(Json(profile.into()))
}

/// PUT /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile =
        service::update_profile(&state.store, &state.latency, auth.user.id, update).await?;
    Ok(Json(profile.into()))
}

/// POST /api/v1/profile/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<SkillRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile =
        service::add_skill(&state.store, &state.latency, auth.user.id, &request.skill).await?;
    Ok(Json(profile.into()))
}

/// DELETE /api/v1/profile/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(skill): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile =
        service::remove_skill(&state.store, &state.latency, auth.user.id, &skill).await?;
    Ok(Json(profile.into()))
}

/// POST /api/v1/profile/entries/:section
pub async fn handle_add_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(section): Path<Section>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user_id = auth.user.id;
    let entry = match section {
        Section::Education => add::<Education>(&state, user_id, body).await?,
        Section::Experience => add::<Experience>(&state, user_id, body).await?,
        Section::Projects => add::<Project>(&state, user_id, body).await?,
        Section::Certifications => add::<Certification>(&state, user_id, body).await?,
    };
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/v1/profile/entries/:section/:id
pub async fn handle_update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((section, entry_id)): Path<(Section, u64)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let user_id = auth.user.id;
    let entry = match section {
        Section::Education => update::<Education>(&state, user_id, entry_id, body).await?,
        Section::Experience => update::<Experience>(&state, user_id, entry_id, body).await?,
        Section::Projects => update::<Project>(&state, user_id, entry_id, body).await?,
        Section::Certifications => {
            update::<Certification>(&state, user_id, entry_id, body).await?
        }
    };
    Ok(Json(entry))
}

/// DELETE /api/v1/profile/entries/:section/:id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((section, entry_id)): Path<(Section, u64)>,
) -> Result<StatusCode, AppError> {
    let (store, latency, user_id) = (&state.store, &state.latency, auth.user.id);
    match section {
        Section::Education => {
            service::remove_entry::<Education>(store, latency, user_id, entry_id).await?
        }
        Section::Experience => {
            service::remove_entry::<Experience>(store, latency, user_id, entry_id).await?
        }
        Section::Projects => {
            service::remove_entry::<Project>(store, latency, user_id, entry_id).await?
        }
        Section::Certifications => {
            service::remove_entry::<Certification>(store, latency, user_id, entry_id).await?
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn add<T>(state: &AppState, user_id: u64, body: Value) -> Result<Value, AppError>
where
    T: ProfileEntry + Serialize + DeserializeOwned,
{
    let entry: T = parse_entry(body)?;
    let added = service::add_entry(&state.store, &state.latency, user_id, entry).await?;
    to_json(&added)
}

async fn update<T>(
    state: &AppState,
    user_id: u64,
    entry_id: u64,
    body: Value,
) -> Result<Value, AppError>
where
    T: ProfileEntry + Serialize + DeserializeOwned,
{
    let entry: T = parse_entry(body)?;
    let updated =
        service::update_entry(&state.store, &state.latency, user_id, entry_id, entry).await?;
    to_json(&updated)
}

fn parse_entry<T: ProfileEntry + DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid {} entry: {e}", T::LABEL)))
}

fn to_json<T: Serialize>(entry: &T) -> Result<Value, AppError> {
    serde_json::to_value(entry).map_err(|e| AppError::Internal(e.into()))
}
