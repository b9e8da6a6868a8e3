//! Effective configuration for a run.

use std::path::Path;

use anyhow::{Context, Result};

use freight_model::{ColumnMatchMode, CompanyMatchMode, DashboardConfig};
use freight_standards::{load_alias_csv, load_effective_config, validate_config};

/// Where the configuration comes from and what the command line overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsSources<'a> {
    pub config: Option<&'a Path>,
    pub aliases: Option<&'a Path>,
    pub column_match: Option<ColumnMatchMode>,
    pub company_match: Option<CompanyMatchMode>,
}

/// Loads the config and applies the alias sheet and match-mode overrides.
pub fn load_settings(sources: &SettingsSources<'_>) -> Result<DashboardConfig> {
    let mut config = load_effective_config(sources.config).context("load dashboard config")?;

    if let Some(path) = sources.aliases {
        config.companies = load_alias_csv(path)
            .with_context(|| format!("load alias sheet {}", path.display()))?;
    }
    if let Some(mode) = sources.column_match {
        config.matching.columns = mode;
    }
    if let Some(mode) = sources.company_match {
        config.matching.companies = mode;
    }

    if sources.aliases.is_some() || sources.company_match.is_some() {
        for warning in validate_config(&config).context("validate dashboard config")? {
            tracing::warn!("{warning}");
        }
    }
    tracing::debug!(
        columns = config.matching.columns.as_str(),
        companies = config.matching.companies.as_str(),
        groups = config.companies.len(),
        "effective settings"
    );
    Ok(config)
}
