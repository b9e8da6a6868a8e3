//! Built-in configuration embedded at compile time.
//!
//! The defaults ship inside the binary so the CLI works without any file on
//! disk; a user config only needs to contain the sections it overrides.

/// Default keyword lists, matching modes, executive thresholds and alias table.
pub const DEFAULT_CONFIG: &str = include_str!("../data/defaults.toml");
