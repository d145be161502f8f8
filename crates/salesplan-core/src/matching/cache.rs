//! Memoized match pass: one computation per token batch.

use tracing::debug;

use super::catalog::FieldCatalog;
use super::matcher::{FieldMatcher, Mapping};

/// Caches the mapping of the most recent batch.
///
/// The batch identity is the exact sequence of token texts. Asking again
/// for the same batch returns the stored mapping; a different batch or a
/// new catalog triggers a fresh pass.
pub struct MatchCache {
    matcher: FieldMatcher,
    last: Option<(Vec<String>, Mapping)>,
    runs: usize,
}

impl MatchCache {
    pub fn new(catalog: FieldCatalog) -> Self {
        Self {
            matcher: FieldMatcher::new(catalog),
            last: None,
            runs: 0,
        }
    }

    /// Mapping for a batch, computed at most once per distinct batch.
    pub fn match_batch<T: AsRef<str>>(&mut self, tokens: &[T]) -> &Mapping {
        let fresh = match &self.last {
            Some((batch, _)) => {
                batch.len() != tokens.len()
                    || batch.iter().zip(tokens).any(|(a, b)| a != b.as_ref())
            }
            None => true,
        };

        if fresh {
            self.last = None;
        } else {
            debug!("Reusing mapping for unchanged batch of {} tokens", tokens.len());
        }

        let (_, mapping) = self.last.get_or_insert_with(|| {
            self.runs += 1;
            let batch = tokens.iter().map(|t| t.as_ref().to_string()).collect();
            (batch, self.matcher.suggest(tokens))
        });
        mapping
    }

    /// Swap the catalog. The cached mapping is dropped.
    pub fn set_catalog(&mut self, catalog: FieldCatalog) {
        if *self.matcher.catalog() != catalog {
            self.matcher = FieldMatcher::new(catalog);
            self.invalidate();
        }
    }

    /// Force the next call to recompute.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Number of match passes actually run.
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn matcher(&self) -> &FieldMatcher {
        &self.matcher
    }
}
