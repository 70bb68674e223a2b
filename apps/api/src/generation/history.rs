//! Resume history view: title search and sort over a user's resumes.

use serde::Deserialize;

use crate::models::resume::Resume;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Title,
}

/// Query string accepted by the history listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub search: Option<String>,
    pub sort: Option<SortOrder>,
}

/// Keeps resumes whose title contains `search` (case-insensitive), then sorts.
/// A blank search keeps everything.
pub fn filter_and_sort(mut resumes: Vec<Resume>, query: &HistoryQuery) -> Vec<Resume> {
    if let Some(needle) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let needle = needle.to_lowercase();
        resumes.retain(|r| r.title.to_lowercase().contains(&needle));
    }

    match query.sort.unwrap_or_default() {
        SortOrder::Newest => {
            resumes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
        }
        SortOrder::Oldest => {
            resumes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
        }
        SortOrder::Title => resumes.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then(a.id.cmp(&b.id))
        }),
    }
    resumes
}
