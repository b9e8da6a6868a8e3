//! Dashboard configuration document.
//!
//! The keyword lists, alias table and executive thresholds are data, not
//! code: they are deserialized from TOML and handed to the resolver and the
//! normalizer at construction time.

use serde::{Deserialize, Serialize};

use crate::alias::AliasTable;
use crate::enums::{ColumnMatchMode, CompanyMatchMode, Role};

/// Candidate header keywords per role, most specific first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleKeywords {
    pub date: Vec<String>,
    pub product: Vec<String>,
    pub tonnage: Vec<String>,
    pub company: Vec<String>,
    pub destination: Vec<String>,
    pub duration: Vec<String>,
}

impl RoleKeywords {
    pub fn get(&self, role: Role) -> &[String] {
        match role {
            Role::Date => &self.date,
            Role::Product => &self.product,
            Role::Tonnage => &self.tonnage,
            Role::Company => &self.company,
            Role::Destination => &self.destination,
            Role::Duration => &self.duration,
        }
    }

    pub fn set(&mut self, role: Role, keywords: Vec<String>) {
        let slot = match role {
            Role::Date => &mut self.date,
            Role::Product => &mut self.product,
            Role::Tonnage => &mut self.tonnage,
            Role::Company => &mut self.company,
            Role::Destination => &mut self.destination,
            Role::Duration => &mut self.duration,
        };
        *slot = keywords;
    }

    /// Builder-style variant of [`Self::set`].
    #[must_use]
    pub fn with(mut self, role: Role, keywords: &[&str]) -> Self {
        self.set(role, keywords.iter().map(|k| (*k).to_string()).collect());
        self
    }
}

/// Matching strictness for columns and companies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingOptions {
    pub columns: ColumnMatchMode,
    pub companies: CompanyMatchMode,
}

/// Parameters for the day-over-day product comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutiveThresholds {
    /// Product code the comparison is restricted to.
    pub product_code: String,
    /// Number of companies listed in the top and bottom rankings.
    pub top_n: usize,
    /// Percentage drop (positive number) that raises a drop alert.
    pub drop_alert_pct: f64,
    /// Percentage increase that raises a surge alert.
    pub surge_alert_pct: f64,
    /// Share of today's tonnage (0.0-1.0) held by one company that raises
    /// a concentration alert.
    pub concentration_alert_share: f64,
}

impl Default for ExecutiveThresholds {
    fn default() -> Self {
        Self {
            product_code: "SLIT".to_string(),
            top_n: 5,
            drop_alert_pct: 10.0,
            surge_alert_pct: 20.0,
            concentration_alert_share: 0.5,
        }
    }
}

/// Complete configuration consumed by the dashboard pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub matching: MatchingOptions,
    #[serde(default)]
    pub roles: RoleKeywords,
    #[serde(default)]
    pub executive: ExecutiveThresholds,
    #[serde(default, rename = "company")]
    pub companies: AliasTable,
}
