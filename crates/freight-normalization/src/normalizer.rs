//! Company name normalizer.
//!
//! Lookup runs on canonical keys (trimmed, upper-cased, accents stripped,
//! whitespace removed in strict mode or collapsed in lenient mode):
//!
//! 1. exact hit on the reverse variant map;
//! 2. otherwise the first variant, walking groups and variants in table
//!    order, that contains the input or is contained in it;
//! 3. otherwise the raw input is kept.
//!
//! Step 2 is order dependent on purpose: there is no scoring, the table
//! order decides.

use std::collections::HashMap;

use serde::Serialize;

use freight_common::canonical_key;
use freight_model::{AliasTable, CompanyMatchMode, DashboardConfig};

/// How a raw value reached its canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The canonical key equals a known variant.
    Exact,
    /// Substring fallback in either direction.
    Substring,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Substring => "substring",
        }
    }
}

/// A successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyMatch<'a> {
    pub canonical: &'a str,
    pub kind: MatchKind,
}

#[derive(Debug, Clone)]
struct GroupKeys {
    canonical: String,
    keys: Vec<String>,
}

/// Reverse lookup built once from an alias table.
#[derive(Debug, Clone)]
pub struct CompanyNormalizer {
    mode: CompanyMatchMode,
    groups: Vec<GroupKeys>,
    exact: HashMap<String, usize>,
}

impl CompanyNormalizer {
    /// Builds the lookup. On a shared variant the earlier group keeps it.
    pub fn new(table: &AliasTable, mode: CompanyMatchMode) -> Self {
        let policy = mode.whitespace_policy();
        let mut groups = Vec::with_capacity(table.len());
        let mut exact: HashMap<String, usize> = HashMap::new();

        for (index, group) in table.iter().enumerate() {
            let mut keys = Vec::new();
            for variant in group.lookup_variants() {
                let key = canonical_key(variant, policy);
                if key.is_empty() || keys.contains(&key) {
                    continue;
                }
                match exact.get(&key) {
                    Some(&owner) if owner != index => {
                        tracing::warn!(
                            variant,
                            kept = %table.groups()[owner].canonical,
                            ignored = %group.canonical,
                            "company variant belongs to two groups; keeping the first"
                        );
                    }
                    Some(_) => {}
                    None => {
                        exact.insert(key.clone(), index);
                    }
                }
                keys.push(key);
            }
            groups.push(GroupKeys {
                canonical: group.canonical.clone(),
                keys,
            });
        }

        tracing::debug!(
            groups = groups.len(),
            variants = exact.len(),
            mode = mode.as_str(),
            "built company lookup"
        );
        Self {
            mode,
            groups,
            exact,
        }
    }

    /// Builds the lookup from the config's alias table and company mode.
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(&config.companies, config.matching.companies)
    }

    pub fn mode(&self) -> CompanyMatchMode {
        self.mode
    }

    /// Number of alias groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Looks a raw value up without falling back to the input.
    pub fn resolve(&self, raw: &str) -> Option<CompanyMatch<'_>> {
        let key = canonical_key(raw, self.mode.whitespace_policy());
        // Everything contains the empty string.
        if key.is_empty() {
            return None;
        }

        if let Some(&index) = self.exact.get(&key) {
            return Some(CompanyMatch {
                canonical: &self.groups[index].canonical,
                kind: MatchKind::Exact,
            });
        }

        self.groups
            .iter()
            .find(|group| {
                group
                    .keys
                    .iter()
                    .any(|variant| key.contains(variant.as_str()) || variant.contains(key.as_str()))
            })
            .map(|group| CompanyMatch {
                canonical: &group.canonical,
                kind: MatchKind::Substring,
            })
    }

    /// Canonical name for `raw`, or `raw` itself when nothing matches.
    pub fn normalize(&self, raw: Option<&str>) -> Option<String> {
        raw.map(|value| self.normalize_str(value))
    }

    pub fn normalize_str(&self, raw: &str) -> String {
        match self.resolve(raw) {
            Some(found) => found.canonical.to_string(),
            None => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_model::AliasGroup;

    fn table() -> AliasTable {
        AliasTable::new(vec![
            AliasGroup::new(
                "M&Q SPA",
                vec![
                    "M&Q SPA".to_string(),
                    "M & Q".to_string(),
                    "MINING AND QUARRYING SPA".to_string(),
                ],
            ),
            AliasGroup::new("CARGAS DEL NORTE SPA", vec!["CDN SPA".to_string()]),
        ])
    }

    fn strict() -> CompanyNormalizer {
        CompanyNormalizer::new(&table(), CompanyMatchMode::Strict)
    }

    #[test]
    fn exact_variants_map_to_canonical() {
        let normalizer = strict();
        assert_eq!(normalizer.normalize_str("m & q"), "M&Q SPA");
        assert_eq!(normalizer.normalize_str("Mining and Quarrying SPA "), "M&Q SPA");
        assert_eq!(
            normalizer.resolve("cdn spa"),
            Some(CompanyMatch {
                canonical: "CARGAS DEL NORTE SPA",
                kind: MatchKind::Exact
            })
        );
    }

    #[test]
    fn canonical_not_listed_is_still_a_variant() {
        let normalizer = strict();
        assert_eq!(normalizer.normalize_str("Cargas del Norte SPA"), "CARGAS DEL NORTE SPA");
    }

    #[test]
    fn none_and_empty_pass_through() {
        let normalizer = strict();
        assert_eq!(normalizer.normalize(None), None);
        assert_eq!(normalizer.normalize(Some("")), Some(String::new()));
        assert_eq!(normalizer.normalize_str("   "), "   ");
    }

    #[test]
    fn unknown_company_is_kept_verbatim() {
        let normalizer = strict();
        assert_eq!(normalizer.normalize_str(" Fletes Sur Ltda "), " Fletes Sur Ltda ");
        assert_eq!(normalizer.resolve("Fletes Sur Ltda"), None);
    }

    #[test]
    fn substring_in_both_directions() {
        let normalizer = strict();
        let longer = normalizer.resolve("Transportes CDN SPA Norte").unwrap();
        assert_eq!(longer.canonical, "CARGAS DEL NORTE SPA");
        assert_eq!(longer.kind, MatchKind::Substring);

        let shorter = normalizer.resolve("Mining and Quarrying").unwrap();
        assert_eq!(shorter.canonical, "M&Q SPA");
        assert_eq!(shorter.kind, MatchKind::Substring);
    }

    #[test]
    fn substring_fallback_takes_first_group() {
        // "SPA" is contained in variants of both groups.
        assert_eq!(strict().normalize_str("spa"), "M&Q SPA");

        let reversed: AliasTable = table().groups().iter().rev().cloned().collect();
        let normalizer = CompanyNormalizer::new(&reversed, CompanyMatchMode::Strict);
        assert_eq!(normalizer.normalize_str("spa"), "CARGAS DEL NORTE SPA");
    }

    #[test]
    fn lenient_mode_keeps_word_boundaries() {
        let normalizer = CompanyNormalizer::new(&table(), CompanyMatchMode::Lenient);
        assert_eq!(normalizer.normalize_str("m  &  q"), "M&Q SPA");
        assert_eq!(normalizer.resolve("M&Q").map(|m| m.kind), Some(MatchKind::Substring));
        // Strict mode treats "M&Q" and "M & Q" as the same key.
        assert_eq!(strict().resolve("M&Q").map(|m| m.kind), Some(MatchKind::Exact));
    }

    #[test]
    fn accents_are_ignored() {
        let table = AliasTable::new(vec![AliasGroup::new(
            "LOGISTICA DEL PACIFICO SA",
            vec!["LOGÍSTICA DEL PACÍFICO".to_string()],
        )]);
        let normalizer = CompanyNormalizer::new(&table, CompanyMatchMode::Strict);
        assert_eq!(
            normalizer.normalize_str("logistica del pacifico"),
            "LOGISTICA DEL PACIFICO SA"
        );
    }

    #[test]
    fn first_group_keeps_shared_variant() {
        let table = AliasTable::new(vec![
            AliasGroup::new("ACME", vec!["ACME LTDA".to_string()]),
            AliasGroup::new("ACME CARGO", vec!["acme ltda".to_string()]),
        ]);
        let normalizer = CompanyNormalizer::new(&table, CompanyMatchMode::Strict);
        assert_eq!(normalizer.normalize_str("Acme Ltda"), "ACME");
        assert_eq!(normalizer.normalize_str("acme cargo"), "ACME CARGO");
    }

    #[test]
    fn empty_table_passes_everything_through() {
        let normalizer = CompanyNormalizer::new(&AliasTable::default(), CompanyMatchMode::Strict);
        assert!(normalizer.is_empty());
        assert_eq!(normalizer.normalize_str("M & Q"), "M & Q");
    }
}
