// Profile maintenance: personal info, list sections with per-entry ids, skills,
// and the completion score shown on the dashboard.

pub mod completeness;
pub mod handlers;
pub mod service;
