//! Analytics Aggregator: totals, per-resume conversion and six-month trends.
//!
//! Pure functions over resume records. The service layer decides when records
//! are synthesized and written back.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;

use crate::models::resume::{HistoryRecord, Resume, ResumeAnalytics};

/// Trailing calendar months covered by `calculate_monthly_trends`.
pub const TREND_MONTHS: u32 = 6;

const SYNTHETIC_HISTORY_DAYS: i64 = 90;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    /// e.g. "Jan 2024"
    pub month: String,
    pub downloads: u32,
    pub views: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumePerformance {
    pub id: u64,
    pub title: String,
    pub downloads: u32,
    pub views: u32,
    /// Percentage with one decimal.
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub total_downloads: u64,
    pub total_views: u64,
    pub total_resumes: usize,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub resume_performance: Vec<ResumePerformance>,
    pub average_downloads_per_resume: u64,
    pub average_views_per_resume: u64,
    pub last_updated: DateTime<Utc>,
}

/// Plausible analytics for a resume that has none: 5 to 54 downloads, views at
/// least twice the downloads, history spread over the last 90 days in ascending order.
pub fn synthesize_analytics<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> ResumeAnalytics {
    let downloads: u32 = rng.gen_range(5..=54);
    let views: u32 = rng.gen_range(0..200u32) + downloads * 2;

    ResumeAnalytics {
        downloads,
        views,
        download_history: backdated_history(rng, now, downloads),
        view_history: backdated_history(rng, now, views),
    }
}

fn backdated_history<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    count: u32,
) -> Vec<HistoryRecord> {
    let mut history: Vec<HistoryRecord> = (0..count)
        .map(|_| {
            let days_ago = rng.gen_range(0..SYNTHETIC_HISTORY_DAYS);
            HistoryRecord::at(now - Duration::days(days_ago))
        })
        .collect();
    history.sort_by_key(|r| r.timestamp);
    history
}

/// `downloads / max(views, 1) * 100` rounded to one decimal; 0 when nothing was downloaded.
pub fn conversion_rate(downloads: u32, views: u32) -> f64 {
    if downloads == 0 {
        return 0.0;
    }
    let rate = f64::from(downloads) / f64::from(views.max(1)) * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Download and view counts for the six calendar months ending with `now`'s month,
/// oldest first. Records outside the window are ignored.
pub fn calculate_monthly_trends(resumes: &[Resume], now: DateTime<Utc>) -> Vec<MonthlyTrend> {
    let current = now.year() * 12 + now.month0() as i32;
    let window: Vec<(i32, u32)> = (0..TREND_MONTHS as i32)
        .rev()
        .map(|back| {
            let index = current - back;
            (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
        })
        .collect();

    let mut trends: Vec<MonthlyTrend> = window
        .iter()
        .map(|&(year, month)| MonthlyTrend {
            month: NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_default(),
            downloads: 0,
            views: 0,
        })
        .collect();

    let bucket = |record: &HistoryRecord| {
        let key = (record.timestamp.year(), record.timestamp.month());
        window.iter().position(|&m| m == key)
    };

    for analytics in resumes.iter().filter_map(|r| r.analytics.as_ref()) {
        for slot in analytics.download_history.iter().filter_map(bucket) {
            trends[slot].downloads += 1;
        }
        for slot in analytics.view_history.iter().filter_map(bucket) {
            trends[slot].views += 1;
        }
    }
    trends
}

/// Aggregates the given resumes. Resumes without analytics count as zero.
pub fn build_report(resumes: &[Resume], now: DateTime<Utc>) -> AnalyticsReport {
    let resume_performance: Vec<ResumePerformance> = resumes
        .iter()
        .map(|resume| {
            let (downloads, views) = resume
                .analytics
                .as_ref()
                .map(|a| (a.downloads, a.views))
                .unwrap_or_default();
            ResumePerformance {
                id: resume.id,
                title: resume.title.clone(),
                downloads,
                views,
                conversion_rate: conversion_rate(downloads, views),
            }
        })
        .collect();

    let total_downloads: u64 = resume_performance.iter().map(|p| u64::from(p.downloads)).sum();
    let total_views: u64 = resume_performance.iter().map(|p| u64::from(p.views)).sum();
    let total_resumes = resumes.len();

    AnalyticsReport {
        total_downloads,
        total_views,
        total_resumes,
        monthly_trends: calculate_monthly_trends(resumes, now),
        resume_performance,
        average_downloads_per_resume: rounded_average(total_downloads, total_resumes),
        average_views_per_resume: rounded_average(total_views, total_resumes),
        last_updated: now,
    }
}

fn rounded_average(total: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    (total as f64 / count as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::PersonalInfo;
    use crate::models::resume::ResumeContent;
    use crate::models::template::{ColorScheme, Customization, FontOption};
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn resume(id: u64, analytics: Option<ResumeAnalytics>) -> Resume {
        Resume {
            id,
            user_id: 1,
            job_analysis_id: 1,
            template_id: 1,
            title: format!("Resume {id}"),
            content: ResumeContent {
                personal_info: PersonalInfo::default(),
                education: vec![],
                experience: vec![],
                skills: vec![],
                projects: vec![],
                certifications: vec![],
            },
            customization: Customization {
                color_scheme: ColorScheme {
                    name: "Navy".to_string(),
                    primary: "#000".to_string(),
                    secondary: "#111".to_string(),
                    accent: "#222".to_string(),
                },
                font: FontOption {
                    name: "Georgia".to_string(),
                    family: "Georgia, serif".to_string(),
                    font_type: "serif".to_string(),
                },
            },
            pdf_url: format!("/api/resumes/{id}/download.pdf"),
            created_at: at(2024, 1, 1),
            analytics,
        }
    }

    fn analytics(downloads: &[DateTime<Utc>], views: &[DateTime<Utc>]) -> ResumeAnalytics {
        ResumeAnalytics {
            downloads: downloads.len() as u32,
            views: views.len() as u32,
            download_history: downloads.iter().copied().map(HistoryRecord::at).collect(),
            view_history: views.iter().copied().map(HistoryRecord::at).collect(),
        }
    }

    #[test]
    fn test_conversion_rate_rounding_and_floor() {
        assert_eq!(conversion_rate(0, 10), 0.0);
        assert_eq!(conversion_rate(1, 3), 33.3);
        assert_eq!(conversion_rate(2, 3), 66.7);
        // views floor of 1
        assert_eq!(conversion_rate(3, 0), 300.0);
    }

    #[test]
    fn test_trends_cover_six_months_oldest_first() {
        let trends = calculate_monthly_trends(&[], at(2024, 3, 15));
        let labels: Vec<&str> = trends.iter().map(|t| t.month.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Oct 2023", "Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024", "Mar 2024"]
        );
        assert!(trends.iter().all(|t| t.downloads == 0 && t.views == 0));
    }

    #[test]
    fn test_trends_bucket_records_by_calendar_month() {
        let resumes = vec![
            resume(
                1,
                Some(analytics(
                    &[at(2024, 1, 21), at(2024, 1, 23), at(2023, 1, 5)],
                    &[at(2024, 3, 1), at(2023, 12, 31)],
                )),
            ),
            resume(2, None),
            resume(3, Some(analytics(&[at(2024, 3, 2)], &[]))),
        ];
        let trends = calculate_monthly_trends(&resumes, at(2024, 3, 15));

        let jan = &trends[3];
        assert_eq!(jan.month, "Jan 2024");
        assert_eq!(jan.downloads, 2);
        assert_eq!(trends[2].views, 1);
        assert_eq!(trends[5].downloads, 1);
        assert_eq!(trends[5].views, 1);
        // the 2023-01 download falls outside the window
        let counted: u32 = trends.iter().map(|t| t.downloads).sum();
        assert_eq!(counted, 3);
    }

    #[test]
    fn test_synthesized_analytics_ranges() {
        let now = at(2024, 6, 1);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let a = synthesize_analytics(&mut rng, now);
            assert!((5..=54).contains(&a.downloads));
            assert!(a.views >= a.downloads * 2 && a.views < a.downloads * 2 + 200);
            assert_eq!(a.download_history.len(), a.downloads as usize);
            assert_eq!(a.view_history.len(), a.views as usize);
            assert!(a
                .download_history
                .windows(2)
                .all(|w| w[0].timestamp <= w[1].timestamp));
            assert!(a
                .view_history
                .iter()
                .all(|r| r.timestamp <= now && r.timestamp > now - Duration::days(90)));
        }
    }

    #[test]
    fn test_report_totals_and_averages() {
        let resumes = vec![
            resume(1, Some(analytics(&[at(2024, 1, 2)], &[at(2024, 1, 1), at(2024, 1, 2)]))),
            resume(2, None),
        ];
        let now = at(2024, 3, 15);
        let report = build_report(&resumes, now);

        assert_eq!(report.total_downloads, 1);
        assert_eq!(report.total_views, 2);
        assert_eq!(report.total_resumes, 2);
        assert_eq!(report.average_downloads_per_resume, 1);
        assert_eq!(report.average_views_per_resume, 1);
        assert_eq!(report.resume_performance[0].conversion_rate, 50.0);
        assert_eq!(report.resume_performance[1].conversion_rate, 0.0);
        assert_eq!(report.monthly_trends.len(), TREND_MONTHS as usize);
        assert_eq!(report.last_updated, now);
    }

    #[test]
    fn test_empty_report_has_zero_averages() {
        let report = build_report(&[], Utc::now());
        assert_eq!(report.total_resumes, 0);
        assert_eq!(report.average_downloads_per_resume, 0);
        assert_eq!(report.average_views_per_resume, 0);
    }
}
