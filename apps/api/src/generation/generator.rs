//! Resume Generation: builds a resume from the user's profile, a job analysis and a template.
//!
//! Flow: template lookup → owned job analysis → current profile → match_profile_to_job →
//!       customization (explicit or template default) → persist → return.

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::analysis::find_owned_analysis;
use crate::generation::content_selector::match_profile_to_job;
use crate::generation::history::{filter_and_sort, HistoryQuery};
use crate::latency::{Latency, Operation};
use crate::models::resume::{Resume, ResumeAnalytics};
use crate::models::template::{Customization, Template};
use crate::profile::service::current_profile;
use crate::store::{Repository, Store};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for resume generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub job_analysis_id: u64,
    pub template_id: u64,
    /// Falls back to the template's first color scheme and first font.
    #[serde(default)]
    pub customization: Option<Customization>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

pub async fn generate_resume(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    request: GenerateRequest,
) -> Result<Resume, AppError> {
    latency.simulate(Operation::GenerateResume).await;

    let template = find_template(store, request.template_id).await?;
    let analysis = find_owned_analysis(store, user_id, request.job_analysis_id).await?;

    let profile = current_profile(store, user_id).await;
    let content = match_profile_to_job(&profile);

    let customization = match request.customization {
        Some(customization) => customization,
        None => template.default_customization().ok_or_else(|| {
            AppError::Validation(format!(
                "Template {} has no default customization",
                template.id
            ))
        })?,
    };

    let id = store.next_id();
    let created_at = Utc::now();
    let resume = Resume {
        id,
        user_id,
        job_analysis_id: analysis.id,
        template_id: template.id,
        title: format!("Resume - {}", created_at.format("%-m/%-d/%Y")),
        content,
        customization,
        pdf_url: format!("/api/resumes/{id}/download.pdf"),
        created_at,
        analytics: Some(ResumeAnalytics::default()),
    };
    store.resumes.upsert(resume.clone()).await;

    info!(
        "Generated resume {id} for user {user_id} (analysis {}, template '{}', {} skills, {} projects)",
        analysis.id,
        template.name,
        resume.content.skills.len(),
        resume.content.projects.len()
    );
    Ok(resume)
}

/// The user's resumes, newest first.
pub async fn get_resumes(
    store: &Store,
    latency: &Latency,
    user_id: u64,
) -> Result<Vec<Resume>, AppError> {
    search_resumes(store, latency, user_id, &HistoryQuery::default()).await
}

/// History listing with optional title search and sort order.
pub async fn search_resumes(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    query: &HistoryQuery,
) -> Result<Vec<Resume>, AppError> {
    latency.simulate(Operation::ListResumes).await;

    let resumes = user_resumes(store, user_id).await;
    let resumes = filter_and_sort(resumes, query);
    debug!("Listed {} resumes for user {user_id}", resumes.len());
    Ok(resumes)
}

/// Removes exactly one of the user's resumes.
pub async fn delete_resume(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    resume_id: u64,
) -> Result<(), AppError> {
    latency.simulate(Operation::DeleteResume).await;

    let owned = store
        .resumes
        .get(resume_id)
        .await
        .is_some_and(|r| r.user_id == user_id);
    if !owned || store.resumes.remove(resume_id).await.is_none() {
        return Err(AppError::NotFound("Resume not found".to_string()));
    }

    info!("Deleted resume {resume_id} for user {user_id}");
    Ok(())
}

/// All resumes owned by the user, in identifier order.
pub async fn user_resumes(store: &Store, user_id: u64) -> Vec<Resume> {
    store
        .resumes
        .filter(&|r: &Resume| r.user_id == user_id)
        .await
}

pub async fn find_template(store: &Store, template_id: u64) -> Result<Template, AppError> {
    store
        .templates
        .get(template_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::analysis::analyze_job_description;
    use crate::generation::history::SortOrder;
    use crate::store::seed::{demo_store, template_catalog, DEMO_USER_ID};

    fn request(job_analysis_id: u64, template_id: u64) -> GenerateRequest {
        GenerateRequest {
            job_analysis_id,
            template_id,
            customization: None,
        }
    }

    #[tokio::test]
    async fn test_generate_uses_trimmed_profile_and_default_customization() {
        let store = demo_store();
        let resume = generate_resume(&store, &Latency::none(), DEMO_USER_ID, request(1, 2))
            .await
            .unwrap();

        let profile = current_profile(&store, DEMO_USER_ID).await;
        assert_eq!(resume.content.skills.len(), profile.skills.len().min(12));
        assert_eq!(resume.content.projects.len(), profile.projects.len().min(3));
        assert_eq!(resume.content.personal_info, profile.personal_info);

        let template = &template_catalog()[1];
        assert_eq!(Some(resume.customization.clone()), template.default_customization());
        assert_eq!(resume.pdf_url, format!("/api/resumes/{}/download.pdf", resume.id));
        assert!(resume.title.starts_with("Resume - "));
        assert_eq!(resume.analytics, Some(ResumeAnalytics::default()));
        assert_eq!(store.resumes.get(resume.id).await, Some(resume));
    }

    #[tokio::test]
    async fn test_explicit_customization_is_kept() {
        let store = demo_store();
        let catalog = template_catalog();
        let custom = Customization {
            color_scheme: catalog[0].color_schemes[1].clone(),
            font: catalog[0].font_options[1].clone(),
        };
        let mut req = request(1, 1);
        req.customization = Some(custom.clone());

        let resume = generate_resume(&store, &Latency::none(), DEMO_USER_ID, req)
            .await
            .unwrap();
        assert_eq!(resume.customization, custom);
    }

    #[tokio::test]
    async fn test_unknown_template_is_not_found() {
        let store = demo_store();
        let err = generate_resume(&store, &Latency::none(), DEMO_USER_ID, request(1, 99))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Template 99 not found"));
    }

    #[tokio::test]
    async fn test_foreign_analysis_is_not_found() {
        let store = demo_store();
        let err = generate_resume(&store, &Latency::none(), 1, request(1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_user_without_profile_gets_empty_content() {
        let store = demo_store();
        let analysis = analyze_job_description(&store, &Latency::none(), 1, "Rust and SQL")
            .await
            .unwrap();
        let resume = generate_resume(&store, &Latency::none(), 1, request(analysis.id, 1))
            .await
            .unwrap();
        assert!(resume.content.skills.is_empty());
        assert!(resume.content.experience.is_empty());
    }

    #[tokio::test]
    async fn test_get_resumes_newest_first() {
        let store = demo_store();
        let fresh = generate_resume(&store, &Latency::none(), DEMO_USER_ID, request(1, 3))
            .await
            .unwrap();
        let resumes = get_resumes(&store, &Latency::none(), DEMO_USER_ID)
            .await
            .unwrap();
        let ids: Vec<u64> = resumes.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![fresh.id, 2, 1]);
    }

    #[tokio::test]
    async fn test_search_resumes_applies_query() {
        let store = demo_store();
        let query = HistoryQuery {
            search: Some("1/20".to_string()),
            sort: Some(SortOrder::Oldest),
        };
        let resumes = search_resumes(&store, &Latency::none(), DEMO_USER_ID, &query)
            .await
            .unwrap();
        assert_eq!(resumes.len(), 1);
        assert_eq!(resumes[0].id, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let store = demo_store();
        delete_resume(&store, &Latency::none(), DEMO_USER_ID, 1)
            .await
            .unwrap();

        let remaining = get_resumes(&store, &Latency::none(), DEMO_USER_ID)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|r| r.id != 1));

        let err = delete_resume(&store, &Latency::none(), DEMO_USER_ID, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Resume not found"));
    }

    #[tokio::test]
    async fn test_delete_of_foreign_resume_is_refused() {
        let store = demo_store();
        let err = delete_resume(&store, &Latency::none(), 1, 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.resumes.get(1).await.is_some());
    }
}
