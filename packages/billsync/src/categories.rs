//! Committee-to-category mapping.
//!
//! Categories are configured as a JSON object of `label -> [committee ids]`
//! and inverted at load time so committee assignments resolve in one lookup.

use std::collections::HashMap;
use std::path::Path;

use crate::error::CategoryError;
use crate::types::BillCategory;

/// Maps committee identifiers to human-curated category labels.
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    by_committee: HashMap<String, String>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `label -> [ids]` configuration format and invert it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let labels: HashMap<String, Vec<i64>> = serde_json::from_str(json)?;
        let mut by_committee = HashMap::new();
        for (label, ids) in labels {
            for id in ids {
                by_committee.insert(id.to_string(), label.clone());
            }
        }
        Ok(Self { by_committee })
    }

    pub fn load(path: &Path) -> Result<Self, CategoryError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// The category for a committee id, or [`BillCategory::Unclassified`]
    /// when the committee is not in the map.
    pub fn resolve(&self, committee_id: &str) -> BillCategory {
        match self.by_committee.get(committee_id) {
            Some(label) => BillCategory::Named(label.clone()),
            None => BillCategory::Unclassified,
        }
    }

    pub fn with_category(mut self, label: &str, committee_ids: &[i64]) -> Self {
        for id in committee_ids {
            self.by_committee.insert(id.to_string(), label.to_string());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.by_committee.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_committee.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverts_labels_to_committee_ids() {
        let map = CategoryMap::from_json(
            r#"{"Education": [123, 456], "Environment": [789]}"#,
        )
        .unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.resolve("123"), BillCategory::Named("Education".to_string()));
        assert_eq!(map.resolve("456"), BillCategory::Named("Education".to_string()));
        assert_eq!(map.resolve("789"), BillCategory::Named("Environment".to_string()));
    }

    #[test]
    fn unknown_committees_are_unclassified() {
        let map = CategoryMap::new().with_category("Education", &[123]);
        assert_eq!(map.resolve("999"), BillCategory::Unclassified);
    }

    #[test]
    fn rejects_malformed_configuration() {
        assert!(CategoryMap::from_json(r#"{"Education": "not-a-list"}"#).is_err());
    }
}
