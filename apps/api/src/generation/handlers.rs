//! Axum route handlers for job analyses, templates and resumes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::extractors::AuthUser;
use crate::errors::AppError;
use crate::generation::analysis;
use crate::generation::customization::{self, CustomizationPreview};
use crate::generation::generator::{self, GenerateRequest};
use crate::generation::history::HistoryQuery;
use crate::models::job_analysis::JobAnalysis;
use crate::models::resume::Resume;
use crate::models::template::{Customization, Template};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Job analyses
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/job-analyses
///
/// Extracts keywords from a pasted job description and stores the analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<JobAnalysis>), AppError> {
    let analysis = analysis::analyze_job_description(
        &state.store,
        &state.latency,
        auth.user.id,
        &request.job_description,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(analysis)))
}

/// GET /api/v1/job-analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<JobAnalysis>>, AppError> {
    let analyses = analysis::get_analyses(&state.store, &state.latency, auth.user.id).await?;
    Ok(Json(analyses))
}

/// GET /api/v1/job-analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(analysis_id): Path<u64>,
) -> Result<Json<JobAnalysis>, AppError> {
    let analysis =
        analysis::get_analysis(&state.store, &state.latency, auth.user.id, analysis_id).await?;
    Ok(Json(analysis))
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Template>>, AppError> {
    let templates = customization::get_templates(&state.store, &state.latency).await?;
    Ok(Json(templates))
}

/// GET /api/v1/templates/:id/customization
pub async fn handle_get_customization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(template_id): Path<u64>,
) -> Result<Json<Customization>, AppError> {
    let saved = customization::get_customization(
        &state.store,
        &state.latency,
        auth.user.id,
        template_id,
    )
    .await?;
    Ok(Json(saved))
}

/// PUT /api/v1/templates/:id/customization
pub async fn handle_save_customization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(template_id): Path<u64>,
    Json(body): Json<Customization>,
) -> Result<Json<Customization>, AppError> {
    customization::save_customization(
        &state.store,
        &state.latency,
        auth.user.id,
        template_id,
        &body,
    )
    .await?;
    Ok(Json(body))
}

/// POST /api/v1/templates/:id/preview
pub async fn handle_apply_customization(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(template_id): Path<u64>,
    Json(body): Json<Customization>,
) -> Result<Json<CustomizationPreview>, AppError> {
    let preview =
        customization::apply_customization(&state.store, &state.latency, template_id, body)
            .await?;
    Ok(Json(preview))
}

// ────────────────────────────────────────────────────────────────────────────
// Resumes
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
///
/// Generates a resume from the caller's profile for a job analysis and template.
pub async fn handle_generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let resume =
        generator::generate_resume(&state.store, &state.latency, auth.user.id, request).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/v1/resumes?search=&sort=newest|oldest|title
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Resume>>, AppError> {
    let resumes =
        generator::search_resumes(&state.store, &state.latency, auth.user.id, &query).await?;
    Ok(Json(resumes))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(resume_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    generator::delete_resume(&state.store, &state.latency, auth.user.id, resume_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
