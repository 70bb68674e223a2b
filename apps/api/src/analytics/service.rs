use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::analytics::aggregator::{build_report, synthesize_analytics, AnalyticsReport};
use crate::errors::AppError;
use crate::generation::generator::user_resumes;
use crate::latency::{Latency, Operation};
use crate::models::resume::{HistoryRecord, Resume, ResumeAnalytics};
use crate::store::{Repository, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    Download,
    View,
}

/// Aggregated analytics over the user's resumes. Resumes without an analytics
/// record get a synthesized one, which is stored.
pub async fn get_analytics(
    store: &Store,
    latency: &Latency,
    user_id: u64,
) -> Result<AnalyticsReport, AppError> {
    latency.simulate(Operation::Analytics).await;

    let now = Utc::now();
    let mut rng = StdRng::from_entropy();
    let resumes = backfill_analytics(store, user_id, &mut rng, now).await;
    Ok(build_report(&resumes, now))
}

/// Writes synthesized analytics onto the user's resumes that lack them and returns
/// the user's resumes as stored afterwards.
pub async fn backfill_analytics<R: Rng + Send>(
    store: &Store,
    user_id: u64,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Resume> {
    let missing: Vec<u64> = user_resumes(store, user_id)
        .await
        .into_iter()
        .filter(|r| r.analytics.is_none())
        .map(|r| r.id)
        .collect();

    for resume_id in missing {
        let synthesized = synthesize_analytics(rng, now);
        store
            .resumes
            .update(
                resume_id,
                Box::new(move |r: &mut Resume| {
                    if r.analytics.is_some() {
                        return false;
                    }
                    r.analytics = Some(synthesized);
                    true
                }),
            )
            .await;
        debug!("Synthesized analytics for resume {resume_id}");
    }

    user_resumes(store, user_id).await
}

pub async fn track_download(
    store: &Store,
    latency: &Latency,
    resume_id: u64,
) -> Result<ResumeAnalytics, AppError> {
    track(store, latency, resume_id, Metric::Download).await
}

pub async fn track_view(
    store: &Store,
    latency: &Latency,
    resume_id: u64,
) -> Result<ResumeAnalytics, AppError> {
    track(store, latency, resume_id, Metric::View).await
}

/// Increments one counter by exactly 1 and appends one history record.
async fn track(
    store: &Store,
    latency: &Latency,
    resume_id: u64,
    metric: Metric,
) -> Result<ResumeAnalytics, AppError> {
    latency.simulate(Operation::Track).await;

    let record = HistoryRecord::at(Utc::now());
    let (resume, _) = store
        .resumes
        .update(
            resume_id,
            Box::new(move |r: &mut Resume| {
                let analytics = r.analytics.get_or_insert_with(ResumeAnalytics::default);
                match metric {
                    Metric::Download => {
                        analytics.downloads += 1;
                        analytics.download_history.push(record);
                    }
                    Metric::View => {
                        analytics.views += 1;
                        analytics.view_history.push(record);
                    }
                }
                true
            }),
        )
        .await
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    info!("Tracked {metric:?} for resume {resume_id}");
    Ok(resume.analytics.unwrap_or_default())
}
