use serde::{Deserialize, Serialize};

use crate::models::profile::Profile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionReport {
    /// 0 – 100, rounded.
    pub percent: u8,
    pub missing_sections: Vec<String>,
}

/// Scores a profile on six equally weighted checks.
pub fn compute_completion(profile: &Profile) -> CompletionReport {
    let info = &profile.personal_info;
    let checks = [
        ("name", !info.first_name.is_empty() && !info.last_name.is_empty()),
        ("contact", !info.email.is_empty() && !info.phone.is_empty()),
        ("summary", !info.summary.is_empty()),
        ("education", !profile.education.is_empty()),
        ("experience", !profile.experience.is_empty()),
        ("skills", !profile.skills.is_empty()),
    ];

    let completed = checks.iter().filter(|(_, done)| *done).count();
    let percent = ((completed as f64 / checks.len() as f64) * 100.0).round() as u8;

    CompletionReport {
        percent,
        missing_sections: checks
            .iter()
            .filter(|(_, done)| !done)
            .map(|(section, _)| section.to_string())
            .collect(),
    }
}
