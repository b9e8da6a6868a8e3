//! Company alias table.
//!
//! Each [`AliasGroup`] pairs a canonical company name with the spellings seen
//! in uploaded sheets. Group order is significant: substring fallback walks
//! groups in definition order and stops at the first hit, so the table keeps
//! groups in a `Vec` rather than a map.

use serde::{Deserialize, Serialize};

/// A canonical company name and its known spelling variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasGroup {
    /// Name every variant normalizes to (e.g. `M&Q SPA`).
    pub canonical: String,
    /// Known spellings, most specific first. May or may not list `canonical`.
    #[serde(default)]
    pub variants: Vec<String>,
}

impl AliasGroup {
    pub fn new(canonical: impl Into<String>, variants: Vec<String>) -> Self {
        Self {
            canonical: canonical.into(),
            variants,
        }
    }

    /// Variants in lookup order, with the canonical name first when the
    /// group does not list it explicitly.
    pub fn lookup_variants(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.variants.len() + 1);
        if !self.variants.iter().any(|v| v == &self.canonical) {
            out.push(self.canonical.as_str());
        }
        out.extend(self.variants.iter().map(String::as_str));
        out
    }
}

/// Ordered collection of alias groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    groups: Vec<AliasGroup>,
}

impl AliasTable {
    pub fn new(groups: Vec<AliasGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[AliasGroup] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn push(&mut self, group: AliasGroup) {
        self.groups.push(group);
    }

    /// Looks up a group by its exact canonical name.
    pub fn get(&self, canonical: &str) -> Option<&AliasGroup> {
        self.groups.iter().find(|g| g.canonical == canonical)
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.canonical.as_str())
    }
}

impl FromIterator<AliasGroup> for AliasTable {
    fn from_iter<I: IntoIterator<Item = AliasGroup>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_variants_prepends_missing_canonical() {
        let group = AliasGroup::new("M&Q SPA", vec!["M & Q".to_string()]);
        assert_eq!(group.lookup_variants(), vec!["M&Q SPA", "M & Q"]);
    }

    #[test]
    fn lookup_variants_keeps_listed_order() {
        let group = AliasGroup::new(
            "M&Q SPA",
            vec!["M & Q".to_string(), "M&Q SPA".to_string()],
        );
        assert_eq!(group.lookup_variants(), vec!["M & Q", "M&Q SPA"]);
    }

    #[test]
    fn table_preserves_definition_order() {
        let table: AliasTable = ["B", "A", "C"]
            .into_iter()
            .map(|name| AliasGroup::new(name, Vec::new()))
            .collect();
        assert_eq!(table.canonical_names().collect::<Vec<_>>(), vec!["B", "A", "C"]);
        assert_eq!(table.get("A").map(|g| g.canonical.as_str()), Some("A"));
        assert!(table.get("Z").is_none());
    }
}
