use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub linked_in: String,
    pub website: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub id: u64,
    pub degree: String,
    pub school: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub id: u64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    /// Free-form; "present" for a current position.
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub id: u64,
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub credential_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub user_id: u64,
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// An empty profile for a user who has not saved anything yet.
    pub fn empty(id: u64, user_id: u64, now: DateTime<Utc>) -> Self {
        Profile {
            id,
            user_id,
            personal_info: PersonalInfo::default(),
            education: Vec::new(),
            experience: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow merge: every supplied top-level field replaces the stored one.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(personal_info) = update.personal_info {
            self.personal_info = personal_info;
        }
        if let Some(education) = update.education {
            self.education = education;
        }
        if let Some(experience) = update.experience {
            self.experience = experience;
        }
        if let Some(skills) = update.skills {
            self.skills = skills;
        }
        if let Some(projects) = update.projects {
            self.projects = projects;
        }
        if let Some(certifications) = update.certifications {
            self.certifications = certifications;
        }
    }

    /// Adds a trimmed skill. Returns false for blank or already-present skills.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Removes a skill by its trimmed value.
    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        let before = self.skills.len();
        self.skills.retain(|s| s != skill);
        self.skills.len() != before
    }

    /// Appends an entry under an id from `next_id` that is unused in its section.
    pub fn push_entry<T: ProfileEntry>(
        &mut self,
        mut entry: T,
        next_id: &mut dyn FnMut() -> u64,
    ) -> u64 {
        let section = T::section(self);
        let mut id = next_id();
        while id == 0 || section.iter().any(|e| e.entry_id() == id) {
            id = next_id();
        }
        entry.set_entry_id(id);
        section.push(entry);
        id
    }

    /// Restores list invariants after wholesale replacement: every entry gets an id
    /// unique within its section, skills are trimmed, non-empty and unique.
    pub fn normalize(&mut self, next_id: &mut dyn FnMut() -> u64) {
        assign_unique_ids(&mut self.education, next_id);
        assign_unique_ids(&mut self.experience, next_id);
        assign_unique_ids(&mut self.projects, next_id);
        assign_unique_ids(&mut self.certifications, next_id);

        let mut seen = HashSet::new();
        let skills = std::mem::take(&mut self.skills);
        self.skills = skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && seen.insert(s.clone()))
            .collect();
    }
}

/// Keeps the first occurrence of each non-zero id; missing and repeated ids are replaced
/// with fresh ones that collide with nothing already kept.
fn assign_unique_ids<T: ProfileEntry>(entries: &mut [T], next_id: &mut dyn FnMut() -> u64) {
    let mut taken = HashSet::new();
    let needs_id: Vec<bool> = entries
        .iter()
        .map(|e| e.entry_id() == 0 || !taken.insert(e.entry_id()))
        .collect();

    for (entry, needs) in entries.iter_mut().zip(needs_id) {
        if needs {
            let mut id = next_id();
            while id == 0 || !taken.insert(id) {
                id = next_id();
            }
            entry.set_entry_id(id);
        }
    }
}

/// Partial profile payload for `update_profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub personal_info: Option<PersonalInfo>,
    pub education: Option<Vec<Education>>,
    pub experience: Option<Vec<Experience>>,
    pub skills: Option<Vec<String>>,
    pub projects: Option<Vec<Project>>,
    pub certifications: Option<Vec<Certification>>,
}

/// A list section of a profile whose entries carry their own identifier.
pub trait ProfileEntry: Clone + Send + Sync + 'static {
    /// Section name used in messages.
    const LABEL: &'static str;

    fn entry_id(&self) -> u64;
    fn set_entry_id(&mut self, id: u64);
    fn section(profile: &mut Profile) -> &mut Vec<Self>;
}

macro_rules! profile_entry {
    ($ty:ty, $field:ident, $label:literal) => {
        impl ProfileEntry for $ty {
            const LABEL: &'static str = $label;

            fn entry_id(&self) -> u64 {
                self.id
            }

            fn set_entry_id(&mut self, id: u64) {
                self.id = id;
            }

            fn section(profile: &mut Profile) -> &mut Vec<Self> {
                &mut profile.$field
            }
        }
    };
}

profile_entry!(Education, education, "education");
profile_entry!(Experience, experience, "experience");
profile_entry!(Project, projects, "project");
profile_entry!(Certification, certifications, "certification");

/// Sections whose entries can be added, edited, and removed one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Education,
    Experience,
    Projects,
    Certifications,
}
