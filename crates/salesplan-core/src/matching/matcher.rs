//! Assigns recognized tokens to catalog fields by string similarity.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

use super::catalog::FieldCatalog;
use super::numeric::is_numeric;
use super::similarity::{normalize, similarity};

/// A token is matched only when its best score is strictly above this.
pub const ACCEPT_THRESHOLD: f64 = 0.5;

/// One accepted token-to-field suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    /// Token text as recognized.
    pub token: String,
    /// Catalog key of the chosen field.
    pub field: String,
    /// Score of the chosen field (0.0 - 1.0).
    pub similarity: f64,
}

/// Suggested mapping from token text to field key.
///
/// Entries keep the order in which tokens first appeared. Each token text
/// appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    matches: Vec<FieldMatch>,
}

impl Mapping {
    /// Field suggested for a token, if any.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.find(token).map(|m| m.field.as_str())
    }

    pub fn find(&self, token: &str) -> Option<&FieldMatch> {
        self.matches.iter().find(|m| m.token == token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.find(token).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldMatch> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Plain `token -> field` map.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.matches
            .iter()
            .map(|m| (m.token.clone(), m.field.clone()))
            .collect()
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.matches.len()))?;
        for m in &self.matches {
            map.serialize_entry(&m.token, &m.field)?;
        }
        map.end()
    }
}

struct PreparedField {
    key: String,
    key_norm: String,
    label_norm: String,
}

/// Matches tokens against a fixed catalog.
///
/// Keys and labels are normalized once on construction; a field scores the
/// better of its key and label similarity.
pub struct FieldMatcher {
    catalog: FieldCatalog,
    prepared: Vec<PreparedField>,
}

impl FieldMatcher {
    pub fn new(catalog: FieldCatalog) -> Self {
        let prepared = catalog
            .fields()
            .iter()
            .map(|f| PreparedField {
                key: f.key.clone(),
                key_norm: normalize(&f.key),
                label_norm: normalize(&f.label),
            })
            .collect();
        Self { catalog, prepared }
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Best-scoring field for a token, regardless of threshold.
    ///
    /// Ties go to the field declared first. Returns `None` for an empty
    /// catalog.
    pub fn best_match(&self, token: &str) -> Option<(&str, f64)> {
        let token = normalize(token);
        let mut best: Option<(&str, f64)> = None;

        for field in &self.prepared {
            let score = similarity(&token, &field.key_norm).max(similarity(&token, &field.label_norm));
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((field.key.as_str(), score));
            }
        }

        best
    }

    /// Suggest a field for every non-numeric token whose best score
    /// exceeds [`ACCEPT_THRESHOLD`].
    pub fn suggest<T: AsRef<str>>(&self, tokens: &[T]) -> Mapping {
        let mut mapping = Mapping::default();

        for token in tokens {
            let text = token.as_ref();
            if is_numeric(text) || mapping.contains(text) {
                continue;
            }

            match self.best_match(text) {
                Some((field, score)) if score > ACCEPT_THRESHOLD => {
                    trace!("Token {:?} -> {} ({:.3})", text, field, score);
                    mapping.matches.push(FieldMatch {
                        token: text.to_string(),
                        field: field.to_string(),
                        similarity: score,
                    });
                }
                Some((field, score)) => {
                    trace!("Token {:?} rejected, best {} ({:.3})", text, field, score);
                }
                None => {}
            }
        }

        debug!(
            "Matched {} of {} tokens against {} fields",
            mapping.len(),
            tokens.len(),
            self.catalog.len()
        );

        mapping
    }
}

/// Suggest field mappings for a token batch.
///
/// Pure function of its inputs: numeric tokens are skipped, comparison is
/// case-insensitive and trimmed, and only scores above 0.5 are kept.
pub fn suggest_mappings<T: AsRef<str>>(tokens: &[T], catalog: &FieldCatalog) -> Mapping {
    FieldMatcher::new(catalog.clone()).suggest(tokens)
}
