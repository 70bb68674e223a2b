use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::extractors::AuthUser;
use crate::errors::AppError;
use crate::generation::generator::get_resumes;
use crate::latency::Latency;
use crate::models::resume::Resume;
use crate::profile::completeness::{compute_completion, CompletionReport};
use crate::profile::service::get_profile;
use crate::state::AppState;
use crate::store::Store;

const RECENT_RESUMES: usize = 3;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub completion: CompletionReport,
    pub total_resumes: usize,
    pub recent_resumes: Vec<Resume>,
}

pub async fn get_dashboard(
    store: &Store,
    latency: &Latency,
    user_id: u64,
) -> Result<DashboardSummary, AppError> {
    let profile = get_profile(store, latency, user_id).await?;
    let mut resumes = get_resumes(store, latency, user_id).await?;

    let total_resumes = resumes.len();
    resumes.truncate(RECENT_RESUMES);
    Ok(DashboardSummary {
        completion: compute_completion(&profile),
        total_resumes,
        recent_resumes: resumes,
    })
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = get_dashboard(&state.store, &state.latency, auth.user.id).await?;
    Ok(Json(summary))
}
