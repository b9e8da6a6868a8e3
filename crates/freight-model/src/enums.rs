//! Type-safe enumerations for column roles and matching modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use freight_common::WhitespacePolicy;

use crate::error::ModelError;

/// Semantic role a table column can play in the dashboards.
///
/// A table resolves zero or one column per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shipment or dispatch date.
    Date,
    /// Product code or description (e.g. `SLIT`).
    Product,
    /// Weight moved, in tonnes.
    Tonnage,
    /// Transport company.
    Company,
    /// Destination site or port.
    Destination,
    /// Trip or loading duration.
    Duration,
}

impl Role {
    /// Every role, in resolution and display order.
    pub const ALL: [Role; 6] = [
        Role::Date,
        Role::Product,
        Role::Tonnage,
        Role::Company,
        Role::Destination,
        Role::Duration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Date => "DATE",
            Role::Product => "PRODUCT",
            Role::Tonnage => "TONNAGE",
            Role::Company => "COMPANY",
            Role::Destination => "DESTINATION",
            Role::Duration => "DURATION",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    /// Parses a role name case-insensitively (`date`, `DATE`, ` Date `).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownRole(s.trim().to_string()))
    }
}

/// How column names are compared against role keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMatchMode {
    /// Normalized column name must equal a normalized keyword.
    Exact,
    /// Normalized keyword may appear anywhere in the normalized column name.
    #[default]
    Loose,
}

impl ColumnMatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnMatchMode::Exact => "exact",
            ColumnMatchMode::Loose => "loose",
        }
    }
}

impl FromStr for ColumnMatchMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(ColumnMatchMode::Exact),
            "loose" => Ok(ColumnMatchMode::Loose),
            other => Err(ModelError::UnknownMatchMode(other.to_string())),
        }
    }
}

/// How company names are canonicalized before lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyMatchMode {
    /// Remove all internal whitespace (`M & Q` == `M&Q`).
    #[default]
    Strict,
    /// Collapse whitespace runs but keep word boundaries.
    Lenient,
}

impl CompanyMatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyMatchMode::Strict => "strict",
            CompanyMatchMode::Lenient => "lenient",
        }
    }

    pub fn whitespace_policy(&self) -> WhitespacePolicy {
        match self {
            CompanyMatchMode::Strict => WhitespacePolicy::Remove,
            CompanyMatchMode::Lenient => WhitespacePolicy::Collapse,
        }
    }
}

impl FromStr for CompanyMatchMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(CompanyMatchMode::Strict),
            "lenient" => Ok(CompanyMatchMode::Lenient),
            other => Err(ModelError::UnknownMatchMode(other.to_string())),
        }
    }
}
