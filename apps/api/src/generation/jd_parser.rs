//! JD Parser: extracts a categorized keyword bag from a raw job description.
//!
//! Matching is plain substring containment against three fixed vocabularies on the
//! lower-cased text: no stemming, no word boundaries, no relevance ordering. Results
//! follow vocabulary order.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::job_analysis::{KeywordBag, MatchStrength};

pub const TECHNICAL_SKILLS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "angular",
    "vue",
    "node.js",
    "python",
    "java",
    "c#",
    "php",
    "ruby",
    "go",
    "rust",
    "html",
    "css",
    "sass",
    "scss",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "git",
    "jenkins",
    "ci/cd",
    "agile",
    "scrum",
    "rest api",
    "graphql",
    "microservices",
    "webpack",
    "babel",
    "jest",
    "cypress",
    "selenium",
    "linux",
    "nginx",
    "apache",
    "terraform",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "critical thinking",
    "time management",
    "project management",
    "collaboration",
    "mentoring",
    "coaching",
    "analytical thinking",
];

pub const EXPERIENCE_LEVELS: &[&str] = &[
    "junior",
    "senior",
    "lead",
    "principal",
    "architect",
    "manager",
    "director",
    "entry level",
    "mid level",
    "experienced",
];

/// Combined technical + soft matches needed for each strength tier.
const HIGH_THRESHOLD: usize = 8;
const MEDIUM_THRESHOLD: usize = 4;

lazy_static! {
    static ref YEARS_OF_EXPERIENCE: Regex =
        Regex::new(r"(?i)(\d+)\+?\s*years?\s*(of\s+)?experience")
            .expect("years-of-experience pattern is valid");
}

/// Extracts the keyword bag for a job description. Empty text yields an empty, `Low` bag.
pub fn extract_keywords(job_description: &str) -> KeywordBag {
    let text = job_description.to_lowercase();

    let technical_skills = find_terms(&text, TECHNICAL_SKILLS);
    let soft_skills = find_terms(&text, SOFT_SKILLS);
    let experience_level = find_terms(&text, EXPERIENCE_LEVELS);

    let years_required = YEARS_OF_EXPERIENCE
        .find(&text)
        .map(|m| m.as_str().to_string());

    let match_strength = calculate_match_strength(technical_skills.len(), soft_skills.len());

    KeywordBag {
        technical_skills,
        soft_skills,
        experience_level,
        years_required,
        match_strength,
    }
}

/// `High` at 8+ combined matches, `Medium` at 4+, otherwise `Low`.
pub fn calculate_match_strength(technical_count: usize, soft_count: usize) -> MatchStrength {
    let total = technical_count + soft_count;
    if total >= HIGH_THRESHOLD {
        MatchStrength::High
    } else if total >= MEDIUM_THRESHOLD {
        MatchStrength::Medium
    } else {
        MatchStrength::Low
    }
}

fn find_terms(text: &str, vocabulary: &[&str]) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|term| text.contains(*term))
        .map(|term| term.to_string())
        .collect()
}
