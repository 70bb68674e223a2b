use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse strength of a job description's keyword signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrength {
    #[default]
    Low,
    Medium,
    High,
}

/// Keywords found in a job description, grouped by vocabulary.
/// Each list preserves vocabulary order, not the order of appearance in the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordBag {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience_level: Vec<String>,
    pub years_required: Option<String>,
    pub match_strength: MatchStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub id: u64,
    pub user_id: u64,
    pub job_description: String,
    pub extracted_keywords: KeywordBag,
    pub created_at: DateTime<Utc>,
}
