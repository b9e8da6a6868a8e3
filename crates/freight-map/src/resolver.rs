//! Keyword-based column resolution.
//!
//! For each role the keywords are tried in configured order and, for each
//! keyword, the columns in table order. The first hit wins, so a more
//! specific keyword listed earlier (`EMPRESA DE TRANSPORTE`) beats a generic
//! one (`EMPRESA`) even when the generic column comes first in the table.

use std::collections::BTreeMap;

use serde::Serialize;

use freight_common::column_key;
use freight_model::{ColumnMatchMode, Role, RoleKeywords};

use crate::error::{MapError, Result};

/// A resolved column and what matched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleMatch {
    /// Column name as it appears in the table.
    pub column: String,
    /// Keyword that matched, or `None` when the column was picked by dtype.
    pub keyword: Option<String>,
}

impl RoleMatch {
    pub fn by_keyword(column: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            keyword: Some(keyword.into()),
        }
    }

    pub fn by_dtype(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            keyword: None,
        }
    }
}

/// Role to column assignments. Unresolved roles are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedRoles {
    matches: BTreeMap<Role, RoleMatch>,
}

impl ResolvedRoles {
    /// Column resolved for `role`.
    pub fn get(&self, role: Role) -> Option<&str> {
        self.matches.get(&role).map(|m| m.column.as_str())
    }

    /// Full match detail for `role`.
    pub fn get_match(&self, role: Role) -> Option<&RoleMatch> {
        self.matches.get(&role)
    }

    pub fn insert(&mut self, role: Role, role_match: RoleMatch) {
        self.matches.insert(role, role_match);
    }

    pub fn remove(&mut self, role: Role) -> Option<RoleMatch> {
        self.matches.remove(&role)
    }

    /// Resolved pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &RoleMatch)> {
        self.matches.iter().map(|(role, m)| (*role, m))
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Roles from `roles` that did not resolve, in the given order.
    pub fn missing(&self, roles: &[Role]) -> Vec<Role> {
        roles
            .iter()
            .copied()
            .filter(|role| !self.matches.contains_key(role))
            .collect()
    }

    /// Fails with every missing role when any of `roles` is unresolved.
    pub fn require(&self, roles: &[Role]) -> Result<()> {
        let missing = self.missing(roles);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MapError::MissingRoles { roles: missing })
        }
    }
}

fn key_matches(column_key: &str, keyword_key: &str, mode: ColumnMatchMode) -> bool {
    match mode {
        ColumnMatchMode::Exact => column_key == keyword_key,
        ColumnMatchMode::Loose => column_key.contains(keyword_key),
    }
}

/// Resolves one role: the first column, in input order, that matches any
/// keyword. The recorded keyword is the first one in keyword order that
/// matches that column.
fn resolve_with_keys<S: AsRef<str>>(
    columns: &[S],
    column_keys: &[String],
    keywords: &[String],
    mode: ColumnMatchMode,
) -> Option<RoleMatch> {
    // An empty keyword would match every column in loose mode.
    let keyword_keys: Vec<(&str, String)> = keywords
        .iter()
        .map(|keyword| (keyword.as_str(), column_key(keyword)))
        .filter(|(_, key)| !key.is_empty())
        .collect();
    columns.iter().zip(column_keys).find_map(|(column, key)| {
        keyword_keys
            .iter()
            .find(|(_, keyword_key)| key_matches(key, keyword_key, mode))
            .map(|(keyword, _)| RoleMatch::by_keyword(column.as_ref(), *keyword))
    })
}

/// Resolves every role against the column names.
///
/// Roles are independent: the same column may satisfy more than one role.
pub fn resolve<S: AsRef<str>>(
    columns: &[S],
    keywords: &RoleKeywords,
    mode: ColumnMatchMode,
) -> ResolvedRoles {
    let column_keys: Vec<String> = columns.iter().map(|c| column_key(c.as_ref())).collect();
    let mut resolved = ResolvedRoles::default();
    for role in Role::ALL {
        match resolve_with_keys(columns, &column_keys, keywords.get(role), mode) {
            Some(role_match) => {
                tracing::debug!(
                    role = %role,
                    column = %role_match.column,
                    keyword = role_match.keyword.as_deref().unwrap_or_default(),
                    "resolved column role"
                );
                resolved.insert(role, role_match);
            }
            None => tracing::debug!(role = %role, mode = mode.as_str(), "no column for role"),
        }
    }
    resolved
}
