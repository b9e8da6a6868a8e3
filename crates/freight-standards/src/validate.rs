//! Configuration checks.
//!
//! Duplicate canonical names make the alias table ambiguous and are
//! rejected. Overlapping variants are tolerated (the earlier group wins at
//! lookup time) but reported so the table can be cleaned up.

use std::collections::BTreeMap;
use std::fmt;

use freight_common::{canonical_key, column_key};
use freight_model::{DashboardConfig, Role};

use crate::error::{Result, StandardsError};

/// Non-fatal findings about a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The same canonicalized variant appears in two groups.
    OverlappingVariant {
        variant: String,
        first: String,
        second: String,
    },
    /// A role has no usable keyword and will never resolve.
    NoKeywords { role: Role },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverlappingVariant {
                variant,
                first,
                second,
            } => write!(
                f,
                "variant '{variant}' belongs to both '{first}' and '{second}'; '{first}' wins"
            ),
            Self::NoKeywords { role } => write!(f, "role {role} has no keywords configured"),
        }
    }
}

/// Validates a config, returning warnings or the first fatal error.
pub fn validate_config(config: &DashboardConfig) -> Result<Vec<ConfigWarning>> {
    let policy = config.matching.companies.whitespace_policy();
    let mut warnings = Vec::new();

    let mut canonicals: BTreeMap<String, usize> = BTreeMap::new();
    for (index, group) in config.companies.iter().enumerate() {
        let key = canonical_key(&group.canonical, policy);
        if key.is_empty() {
            return Err(StandardsError::EmptyCanonical { index });
        }
        if canonicals.insert(key, index).is_some() {
            return Err(StandardsError::DuplicateCanonical {
                canonical: group.canonical.clone(),
            });
        }
    }

    let mut owners: BTreeMap<String, &str> = BTreeMap::new();
    for group in config.companies.iter() {
        for variant in group.lookup_variants() {
            let key = canonical_key(variant, policy);
            if key.is_empty() {
                continue;
            }
            match owners.get(&key) {
                Some(owner) if *owner != group.canonical => {
                    warnings.push(ConfigWarning::OverlappingVariant {
                        variant: variant.to_string(),
                        first: (*owner).to_string(),
                        second: group.canonical.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    owners.insert(key, group.canonical.as_str());
                }
            }
        }
    }

    for role in Role::ALL {
        let usable = config
            .roles
            .get(role)
            .iter()
            .any(|keyword| !column_key(keyword).is_empty());
        if !usable {
            warnings.push(ConfigWarning::NoKeywords { role });
        }
    }

    Ok(warnings)
}
