// Download and view tracking plus the per-user analytics report.

pub mod aggregator;
pub mod handlers;
pub mod service;
