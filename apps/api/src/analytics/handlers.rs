use axum::{
    extract::{Path, State},
    Json,
};

use crate::analytics::aggregator::AnalyticsReport;
use crate::analytics::service;
use crate::auth::extractors::AuthUser;
use crate::errors::AppError;
use crate::models::resume::ResumeAnalytics;
use crate::state::AppState;

/// GET /api/v1/analytics
pub async fn handle_get_analytics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AnalyticsReport>, AppError> {
    let report = service::get_analytics(&state.store, &state.latency, auth.user.id).await?;
    Ok(Json(report))
}

/// POST /api/v1/resumes/:id/downloads
pub async fn handle_track_download(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(resume_id): Path<u64>,
) -> Result<Json<ResumeAnalytics>, AppError> {
    let analytics = service::track_download(&state.store, &state.latency, resume_id).await?;
    Ok(Json(analytics))
}

/// POST /api/v1/resumes/:id/views
pub async fn handle_track_view(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(resume_id): Path<u64>,
) -> Result<Json<ResumeAnalytics>, AppError> {
    let analytics = service::track_view(&state.store, &state.latency, resume_id).await?;
    Ok(Json(analytics))
}
