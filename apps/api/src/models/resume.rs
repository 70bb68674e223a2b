use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::profile::{Certification, Education, Experience, PersonalInfo, Project};
use crate::models::template::Customization;

/// One download or view event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    /// Human-readable day, e.g. "Mon Jan 15 2024".
    pub date: String,
}

impl HistoryRecord {
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        HistoryRecord {
            timestamp,
            date: timestamp.format("%a %b %d %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalytics {
    pub downloads: u32,
    pub views: u32,
    pub download_history: Vec<HistoryRecord>,
    pub view_history: Vec<HistoryRecord>,
}

/// Profile snapshot embedded in a generated resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: u64,
    pub user_id: u64,
    pub job_analysis_id: u64,
    pub template_id: u64,
    pub title: String,
    pub content: ResumeContent,
    pub customization: Customization,
    pub pdf_url: String,
    pub created_at: DateTime<Utc>,
    /// Absent on legacy records; synthesized on first analytics read.
    pub analytics: Option<ResumeAnalytics>,
}
