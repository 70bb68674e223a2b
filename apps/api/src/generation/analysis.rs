//! Job analysis service: runs the keyword extractor and keeps per-user history.

use chrono::Utc;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::jd_parser::extract_keywords;
use crate::latency::{Latency, Operation};
use crate::models::job_analysis::JobAnalysis;
use crate::store::{Repository, Store};

pub async fn analyze_job_description(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    job_description: &str,
) -> Result<JobAnalysis, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    latency.simulate(Operation::AnalyzeJob).await;

    let extracted_keywords = extract_keywords(job_description);
    let analysis = JobAnalysis {
        id: store.next_id(),
        user_id,
        job_description: job_description.to_string(),
        extracted_keywords,
        created_at: Utc::now(),
    };
    store.job_analyses.upsert(analysis.clone()).await;

    info!(
        "Job analysis {} for user {user_id}: {} technical, {} soft, strength {:?}",
        analysis.id,
        analysis.extracted_keywords.technical_skills.len(),
        analysis.extracted_keywords.soft_skills.len(),
        analysis.extracted_keywords.match_strength
    );
    Ok(analysis)
}

/// The user's analyses, newest first.
pub async fn get_analyses(
    store: &Store,
    latency: &Latency,
    user_id: u64,
) -> Result<Vec<JobAnalysis>, AppError> {
    latency.simulate(Operation::ListAnalyses).await;

    let mut analyses = store
        .job_analyses
        .filter(&|a: &JobAnalysis| a.user_id == user_id)
        .await;
    analyses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    debug!("Loaded {} analyses for user {user_id}", analyses.len());
    Ok(analyses)
}

pub async fn get_analysis(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    analysis_id: u64,
) -> Result<JobAnalysis, AppError> {
    latency.simulate(Operation::ListAnalyses).await;
    find_owned_analysis(store, user_id, analysis_id).await
}

/// Analysis lookup scoped to its owner, without simulated latency.
pub async fn find_owned_analysis(
    store: &Store,
    user_id: u64,
    analysis_id: u64,
) -> Result<JobAnalysis, AppError> {
    store
        .job_analyses
        .get(analysis_id)
        .await
        .filter(|a| a.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Job analysis {analysis_id} not found")))
}
