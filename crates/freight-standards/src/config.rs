//! Loading the dashboard configuration.
//!
//! A user config is layered over the embedded defaults section by section:
//! a section (or a single role's keyword list) present in the user file
//! replaces the default one, anything absent keeps the built-in value. A
//! user file that defines any `[[company]]` group replaces the whole alias
//! table, since group order matters for matching.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use freight_model::{
    AliasTable, DashboardConfig, ExecutiveThresholds, MatchingOptions, Role, RoleKeywords,
};

use crate::embedded::DEFAULT_CONFIG;
use crate::error::{Result, StandardsError};
use crate::validate::validate_config;

/// Environment variable pointing at a config file used when none is given explicitly.
pub const CONFIG_ENV_VAR: &str = "FREIGHT_DASHBOARD_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigOverlay {
    matching: Option<MatchingOptions>,
    roles: Option<RolesOverlay>,
    executive: Option<ExecutiveThresholds>,
    #[serde(rename = "company")]
    companies: Option<AliasTable>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RolesOverlay {
    date: Option<Vec<String>>,
    product: Option<Vec<String>>,
    tonnage: Option<Vec<String>>,
    company: Option<Vec<String>>,
    destination: Option<Vec<String>>,
    duration: Option<Vec<String>>,
}

impl RolesOverlay {
    fn apply(self, keywords: &mut RoleKeywords) {
        let entries = [
            (Role::Date, self.date),
            (Role::Product, self.product),
            (Role::Tonnage, self.tonnage),
            (Role::Company, self.company),
            (Role::Destination, self.destination),
            (Role::Duration, self.duration),
        ];
        for (role, list) in entries {
            if let Some(list) = list {
                keywords.set(role, list);
            }
        }
    }
}

impl ConfigOverlay {
    fn apply(self, mut base: DashboardConfig) -> DashboardConfig {
        if let Some(matching) = self.matching {
            base.matching = matching;
        }
        if let Some(roles) = self.roles {
            roles.apply(&mut base.roles);
        }
        if let Some(executive) = self.executive {
            base.executive = executive;
        }
        if let Some(companies) = self.companies {
            base.companies = companies;
        }
        base
    }
}

/// Parses the embedded default configuration.
pub fn default_config() -> Result<DashboardConfig> {
    toml::from_str(DEFAULT_CONFIG).map_err(StandardsError::Embedded)
}

/// Parses a user config document and layers it over the defaults.
///
/// `origin` is only used in error messages.
pub fn parse_config(text: &str, origin: &Path) -> Result<DashboardConfig> {
    let overlay: ConfigOverlay = toml::from_str(text).map_err(|source| StandardsError::Toml {
        path: origin.to_path_buf(),
        source,
    })?;
    Ok(overlay.apply(default_config()?))
}

/// Reads, layers and validates a config file.
pub fn load_config(path: &Path) -> Result<DashboardConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let config = parse_config(&text, path)?;
    for warning in validate_config(&config)? {
        tracing::warn!(path = %path.display(), "{warning}");
    }
    tracing::info!(
        path = %path.display(),
        companies = config.companies.len(),
        "loaded dashboard config"
    );
    Ok(config)
}

/// Resolves the config to use: the explicit path, then `FREIGHT_DASHBOARD_CONFIG`,
/// then the embedded defaults.
pub fn load_effective_config(explicit: Option<&Path>) -> Result<DashboardConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    if let Ok(value) = std::env::var(CONFIG_ENV_VAR)
        && !value.trim().is_empty()
    {
        return load_config(&PathBuf::from(value));
    }
    tracing::debug!("using built-in dashboard config");
    default_config()
}

/// Serializes a config back to TOML (used by `freight config`).
pub fn config_to_toml(config: &DashboardConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_model::{ColumnMatchMode, CompanyMatchMode};

    #[test]
    fn default_config_parses() {
        let config = default_config().unwrap();
        assert_eq!(config.matching.columns, ColumnMatchMode::Loose);
        assert_eq!(config.matching.companies, CompanyMatchMode::Strict);
        assert_eq!(config.executive.product_code, "SLIT");
        assert_eq!(config.roles.get(Role::Date), ["FECHA", "DATE", "DIA", "DÍA"]);
        assert_eq!(
            config.companies.canonical_names().next(),
            Some("M&Q SPA")
        );
    }

    #[test]
    fn overlay_replaces_only_given_role() {
        let text = r#"
[roles]
tonnage = ["KILOS"]
"#;
        let config = parse_config(text, Path::new("user.toml")).unwrap();
        assert_eq!(config.roles.get(Role::Tonnage), ["KILOS"]);
        assert_eq!(config.roles.get(Role::Date)[0], "FECHA");
        assert!(!config.companies.is_empty());
    }

    #[test]
    fn overlay_replaces_alias_table() {
        let text = r#"
[[company]]
canonical = "ACME"
variants = ["ACME LTDA"]
"#;
        let config = parse_config(text, Path::new("user.toml")).unwrap();
        assert_eq!(config.companies.len(), 1);
        assert_eq!(config.companies.groups()[0].canonical, "ACME");
    }

    #[test]
    fn invalid_toml_reports_path() {
        let err = parse_config("[roles\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, StandardsError::Toml { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = default_config().unwrap();
        let text = config_to_toml(&config).unwrap();
        let parsed = parse_config(&text, Path::new("round.toml")).unwrap();
        assert_eq!(parsed, config);
    }
}
