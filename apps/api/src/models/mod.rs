pub mod job_analysis;
pub mod profile;
pub mod resume;
pub mod template;
pub mod user;
