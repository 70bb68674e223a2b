//! Content Selector: trims a profile down to the content embedded in a resume.
//!
//! Selection is positional: the first skills and projects are kept in profile order.
//! The job analysis keyword bag is not consulted.

use crate::models::profile::Profile;
use crate::models::resume::ResumeContent;

/// Section-level limits for resume content.
pub const SKILL_LIMIT: usize = 12;
pub const PROJECT_LIMIT: usize = 3;

/// Builds resume content from a profile: skills capped at `SKILL_LIMIT`, projects at
/// `PROJECT_LIMIT`, every other section copied unchanged.
pub fn match_profile_to_job(profile: &Profile) -> ResumeContent {
    ResumeContent {
        personal_info: profile.personal_info.clone(),
        education: profile.education.clone(),
        experience: profile.experience.clone(),
        skills: profile.skills.iter().take(SKILL_LIMIT).cloned().collect(),
        projects: profile.projects.iter().take(PROJECT_LIMIT).cloned().collect(),
        certifications: profile.certifications.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Certification, Experience, Project};
    use chrono::Utc;

    fn make_profile(skills: usize, projects: usize) -> Profile {
        let mut profile = Profile::empty(1, 1, Utc::now());
        profile.skills = (0..skills).map(|i| format!("skill-{i}")).collect();
        profile.projects = (0..projects)
            .map(|i| Project {
                id: i as u64 + 1,
                title: format!("project-{i}"),
                ..Default::default()
            })
            .collect();
        profile
    }

    #[test]
    fn test_skills_capped_at_12_in_profile_order() {
        let content = match_profile_to_job(&make_profile(15, 0));
        assert_eq!(content.skills.len(), 12);
        assert_eq!(content.skills.first().map(String::as_str), Some("skill-0"));
        assert_eq!(content.skills.last().map(String::as_str), Some("skill-11"));
    }

    #[test]
    fn test_projects_capped_at_3() {
        let content = match_profile_to_job(&make_profile(0, 5));
        let titles: Vec<&str> = content.projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["project-0", "project-1", "project-2"]);
    }

    #[test]
    fn test_short_lists_pass_through_whole() {
        for (skills, projects) in [(0, 0), (3, 1), (12, 3)] {
            let content = match_profile_to_job(&make_profile(skills, projects));
            assert_eq!(content.skills.len(), skills.min(SKILL_LIMIT));
            assert_eq!(content.projects.len(), projects.min(PROJECT_LIMIT));
        }
    }

    #[test]
    fn test_other_sections_copied_unchanged() {
        let mut profile = make_profile(1, 1);
        profile.personal_info.summary = "Backend engineer".to_string();
        profile.experience = (0..6)
            .map(|i| Experience {
                id: i,
                company: format!("Company {i}"),
                ..Default::default()
            })
            .collect();
        profile.certifications.push(Certification {
            id: 1,
            name: "CKA".to_string(),
            ..Default::default()
        });

        let content = match_profile_to_job(&profile);
        assert_eq!(content.personal_info, profile.personal_info);
        assert_eq!(content.experience, profile.experience);
        assert_eq!(content.certifications, profile.certifications);
        assert_eq!(content.education, profile.education);
    }
}
