//! Field catalog: the ordered set of targets tokens can be matched to.

use serde::{Deserialize, Serialize};

use crate::models::plan::PlanField;

/// A matchable field with its identifier and printed label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogField {
    pub key: String,
    pub label: String,
}

impl CatalogField {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Ordered, read-only list of fields. Order decides ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldCatalog {
    fields: Vec<CatalogField>,
}

impl FieldCatalog {
    pub fn new(fields: Vec<CatalogField>) -> Self {
        Self { fields }
    }

    /// Catalog of bare identifiers; each key doubles as its label.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = keys
            .into_iter()
            .map(|k| {
                let key = k.into();
                CatalogField::new(key.clone(), key)
            })
            .collect();
        Self { fields }
    }

    /// Full plan catalog with printed labels.
    pub fn plan_fields() -> Self {
        Self::from_plan_fields(PlanField::ALL)
    }

    pub fn from_plan_fields<I: IntoIterator<Item = PlanField>>(fields: I) -> Self {
        let fields = fields
            .into_iter()
            .map(|f| CatalogField::new(f.key(), f.label()))
            .collect();
        Self { fields }
    }

    pub fn fields(&self) -> &[CatalogField] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&CatalogField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_catalog_order() {
        let catalog = FieldCatalog::plan_fields();
        assert_eq!(catalog.len(), 17);
        assert_eq!(catalog.fields()[0], CatalogField::new("gsm", "GSM"));
        assert_eq!(catalog.fields()[16], CatalogField::new("auto", "Auto"));
        assert_eq!(catalog.get("gadgets").map(|f| f.label.as_str()), Some("Гаджеты"));
    }

    #[test]
    fn test_from_keys() {
        let catalog = FieldCatalog::from_keys(["a", "b"]);
        assert!(catalog.contains("b"));
        assert!(!catalog.contains("c"));
        assert_eq!(catalog.fields()[0].label, "a");
    }
}
