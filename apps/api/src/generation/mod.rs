// Resume generation: job description analysis, content matching, templates and history.
// Everything here works against the injected Store; nothing reaches outside the process.

pub mod analysis;
pub mod content_selector;
pub mod customization;
pub mod generator;
pub mod handlers;
pub mod history;
pub mod jd_parser;
