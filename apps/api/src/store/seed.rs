//! Demo fixtures loaded at startup when `SEED_DEMO_DATA` is on.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::generation::content_selector::match_profile_to_job;
use crate::generation::jd_parser::extract_keywords;
use crate::models::job_analysis::JobAnalysis;
use crate::models::profile::{
    Certification, Education, Experience, PersonalInfo, Profile, Project,
};
use crate::models::resume::{HistoryRecord, Resume, ResumeAnalytics};
use crate::models::template::{ColorScheme, FontOption, Template};
use crate::models::user::UserRow;
use crate::store::ids::SequentialIds;
use crate::store::local_storage::LocalStorage;
use crate::store::{Entity, InMemoryRepository, Store};

pub const DEMO_USER_ID: u64 = 3;

const DEMO_JOB_DESCRIPTION: &str = "Senior Full Stack Developer. 5+ years of experience \
    with React, Node.js and PostgreSQL on AWS. Docker and Git required. \
    Strong communication and mentoring skills.";

/// Builds a store pre-populated with demo users, a demo profile, the template
/// catalog, one job analysis, and two resumes (one without analytics).
pub fn demo_store() -> Store {
    let users = demo_users();
    let profile = demo_profile();
    let templates = template_catalog();

    let analysis = JobAnalysis {
        id: 1,
        user_id: DEMO_USER_ID,
        job_description: DEMO_JOB_DESCRIPTION.to_string(),
        extracted_keywords: extract_keywords(DEMO_JOB_DESCRIPTION),
        created_at: fixture_time(2024, 1, 20, 14, 0),
    };

    let resumes = demo_resumes(&profile, &templates);

    let next_id = [
        max_id(&users),
        profile.id,
        max_id(&templates),
        analysis.id,
        max_id(&resumes),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
        + 1;

    Store {
        users: Arc::new(InMemoryRepository::with_entities(users)),
        profiles: Arc::new(InMemoryRepository::with_entities(vec![profile])),
        job_analyses: Arc::new(InMemoryRepository::with_entities(vec![analysis])),
        templates: Arc::new(InMemoryRepository::with_entities(templates)),
        resumes: Arc::new(InMemoryRepository::with_entities(resumes)),
        local_storage: Arc::new(LocalStorage::new()),
        ids: Arc::new(SequentialIds::starting_at(next_id)),
    }
}

/// Store holding only the template catalog. Used when demo data is off.
pub fn catalog_only_store() -> Store {
    let templates = template_catalog();
    let next_id = max_id(&templates) + 1;
    Store {
        templates: Arc::new(InMemoryRepository::with_entities(templates)),
        ids: Arc::new(SequentialIds::starting_at(next_id)),
        ..Store::empty()
    }
}

fn max_id<T: Entity>(entities: &[T]) -> u64 {
    entities.iter().map(Entity::id).max().unwrap_or(0)
}

fn fixture_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn demo_users() -> Vec<UserRow> {
    vec![
        UserRow {
            id: 1,
            email: "john.doe@example.com".to_string(),
            password: "password123".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            created_at: fixture_time(2024, 1, 1, 10, 0),
        },
        UserRow {
            id: 2,
            email: "jane.smith@example.com".to_string(),
            password: "password123".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            created_at: fixture_time(2024, 1, 5, 12, 0),
        },
        UserRow {
            id: DEMO_USER_ID,
            email: "demo@autocv.com".to_string(),
            password: "demo123".to_string(),
            first_name: "Demo".to_string(),
            last_name: "User".to_string(),
            created_at: fixture_time(2024, 1, 10, 9, 0),
        },
    ]
}

fn demo_profile() -> Profile {
    let skills = [
        "JavaScript",
        "TypeScript",
        "React",
        "Node.js",
        "Python",
        "PostgreSQL",
        "MongoDB",
        "AWS",
        "Docker",
        "Git",
        "HTML/CSS",
        "Tailwind CSS",
        "Express.js",
        "REST APIs",
        "GraphQL",
    ];

    Profile {
        id: 1,
        user_id: DEMO_USER_ID,
        personal_info: PersonalInfo {
            first_name: "Demo".to_string(),
            last_name: "User".to_string(),
            email: "demo@autocv.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            address: "123 Tech Street".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            zip_code: "94105".to_string(),
            linked_in: "linkedin.com/in/demouser".to_string(),
            website: "demouser.dev".to_string(),
            summary: "Full-stack developer with 5+ years of experience building scalable web \
                      applications using modern technologies."
                .to_string(),
        },
        education: vec![Education {
            id: 1,
            degree: "Bachelor of Science in Computer Science".to_string(),
            school: "University of California, Berkeley".to_string(),
            location: "Berkeley, CA".to_string(),
            start_date: "2016-08".to_string(),
            end_date: "2020-05".to_string(),
            gpa: "3.8".to_string(),
            description: "Relevant coursework: Data Structures, Algorithms, Software \
                          Engineering, Database Systems"
                .to_string(),
        }],
        experience: vec![
            Experience {
                id: 1,
                title: "Senior Full Stack Developer".to_string(),
                company: "TechCorp Solutions".to_string(),
                location: "San Francisco, CA".to_string(),
                start_date: "2022-01".to_string(),
                end_date: "present".to_string(),
                description: "Led development of enterprise web applications using React, \
                              Node.js, and PostgreSQL. Mentored junior developers."
                    .to_string(),
            },
            Experience {
                id: 2,
                title: "Frontend Developer".to_string(),
                company: "StartupHub Inc".to_string(),
                location: "Palo Alto, CA".to_string(),
                start_date: "2020-06".to_string(),
                end_date: "2021-12".to_string(),
                description: "Developed responsive web applications using React and \
                              TypeScript."
                    .to_string(),
            },
        ],
        skills: skills.iter().map(|s| s.to_string()).collect(),
        projects: vec![
            Project {
                id: 1,
                title: "E-commerce Platform".to_string(),
                description: "Full-stack e-commerce platform with authentication, catalog, \
                              cart, and payments."
                    .to_string(),
                technologies: vec![
                    "React".to_string(),
                    "Node.js".to_string(),
                    "PostgreSQL".to_string(),
                    "Stripe API".to_string(),
                ],
                url: "https://github.com/demo/ecommerce-platform".to_string(),
                start_date: "2023-03".to_string(),
                end_date: "2023-08".to_string(),
            },
            Project {
                id: 2,
                title: "Task Management App".to_string(),
                description: "Collaborative task manager with real-time updates.".to_string(),
                technologies: vec![
                    "React".to_string(),
                    "Firebase".to_string(),
                    "WebSocket".to_string(),
                ],
                url: "https://github.com/demo/task-manager".to_string(),
                start_date: "2022-09".to_string(),
                end_date: "2022-12".to_string(),
            },
        ],
        certifications: vec![
            Certification {
                id: 1,
                name: "AWS Certified Developer - Associate".to_string(),
                issuer: "Amazon Web Services".to_string(),
                issue_date: "2023-06".to_string(),
                expiry_date: "2026-06".to_string(),
                credential_id: "AWS-CDA-123456".to_string(),
            },
            Certification {
                id: 2,
                name: "Google Cloud Professional Developer".to_string(),
                issuer: "Google Cloud".to_string(),
                issue_date: "2022-11".to_string(),
                expiry_date: "2024-11".to_string(),
                credential_id: "GCP-PD-789012".to_string(),
            },
        ],
        created_at: fixture_time(2024, 1, 10, 9, 0),
        updated_at: fixture_time(2024, 1, 25, 15, 30),
    }
}

fn scheme(name: &str, primary: &str, secondary: &str, accent: &str) -> ColorScheme {
    ColorScheme {
        name: name.to_string(),
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        accent: accent.to_string(),
    }
}

fn font(name: &str, family: &str, font_type: &str) -> FontOption {
    FontOption {
        name: name.to_string(),
        family: family.to_string(),
        font_type: font_type.to_string(),
    }
}

pub fn template_catalog() -> Vec<Template> {
    vec![
        Template {
            id: 1,
            name: "Modern Professional".to_string(),
            description: "Clean single-column layout with a bold header".to_string(),
            features: vec![
                "ATS-friendly".to_string(),
                "Single column".to_string(),
                "Skills highlight".to_string(),
            ],
            color_schemes: vec![
                scheme("Ocean Blue", "#2563eb", "#1e40af", "#60a5fa"),
                scheme("Forest Green", "#059669", "#047857", "#34d399"),
                scheme("Charcoal", "#374151", "#1f2937", "#9ca3af"),
            ],
            font_options: vec![
                font("Inter", "Inter, sans-serif", "sans-serif"),
                font("Roboto", "Roboto, sans-serif", "sans-serif"),
            ],
        },
        Template {
            id: 2,
            name: "Classic Executive".to_string(),
            description: "Traditional serif layout for senior roles".to_string(),
            features: vec![
                "Two column".to_string(),
                "Leadership summary".to_string(),
            ],
            color_schemes: vec![
                scheme("Navy", "#1e3a8a", "#172554", "#93c5fd"),
                scheme("Burgundy", "#7f1d1d", "#450a0a", "#fca5a5"),
            ],
            font_options: vec![
                font("Georgia", "Georgia, serif", "serif"),
                font("Merriweather", "Merriweather, serif", "serif"),
            ],
        },
        Template {
            id: 3,
            name: "Creative Minimal".to_string(),
            description: "Whitespace-heavy layout with accent sidebar".to_string(),
            features: vec![
                "Sidebar".to_string(),
                "Project showcase".to_string(),
                "Portfolio links".to_string(),
            ],
            color_schemes: vec![
                scheme("Sunset", "#ea580c", "#9a3412", "#fdba74"),
                scheme("Violet", "#7c3aed", "#5b21b6", "#c4b5fd"),
            ],
            font_options: vec![
                font("Poppins", "Poppins, sans-serif", "sans-serif"),
                font("Lora", "Lora, serif", "serif"),
            ],
        },
    ]
}

fn demo_resumes(profile: &Profile, templates: &[Template]) -> Vec<Resume> {
    let content = match_profile_to_job(profile);
    let mut resumes = Vec::new();

    let slots = [
        (1, fixture_time(2024, 1, 20, 14, 30)),
        (2, fixture_time(2024, 1, 22, 10, 15)),
    ];
    for (template, (id, created_at)) in templates.iter().zip(slots) {
        let Some(customization) = template.default_customization() else {
            continue;
        };
        resumes.push(Resume {
            id,
            user_id: DEMO_USER_ID,
            job_analysis_id: 1,
            template_id: template.id,
            title: format!("Resume - {}", created_at.format("%-m/%-d/%Y")),
            content: content.clone(),
            customization,
            pdf_url: format!("/api/resumes/{id}/download.pdf"),
            created_at,
            analytics: None,
        });
    }

    if let Some(first) = resumes.first_mut() {
        let downloads = vec![
            HistoryRecord::at(fixture_time(2024, 1, 21, 9, 0)),
            HistoryRecord::at(fixture_time(2024, 1, 23, 16, 45)),
        ];
        let views = vec![
            HistoryRecord::at(fixture_time(2024, 1, 20, 15, 0)),
            HistoryRecord::at(fixture_time(2024, 1, 21, 8, 50)),
            HistoryRecord::at(fixture_time(2024, 1, 23, 16, 40)),
        ];
        first.analytics = Some(ResumeAnalytics {
            downloads: downloads.len() as u32,
            views: views.len() as u32,
            download_history: downloads,
            view_history: views,
        });
    }

    resumes
}
