//! CLI library components for the freight dashboards.

pub mod logging;
pub mod report;
pub mod settings;
