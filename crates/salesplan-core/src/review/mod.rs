//! Operator review of suggested mappings and conversion to plan values.
//!
//! A [`ReviewSession`] holds one OCR batch. It starts from the matcher's
//! suggestions, lets the operator reassign or clear tokens, and on
//! [`ReviewSession::confirm`] pairs each numeric token with the label
//! that precedes it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ReviewError, ValidationError};
use crate::matching::{is_numeric, leading_number, FieldCatalog, FieldMatcher, Mapping, MatchCache, Token};
use crate::models::config::{PairingPolicy, ReviewConfig};
use crate::models::plan::PlanField;

/// One line of the review table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
    pub text: String,
    pub confidence: f32,
    /// Numeric tokens are values and carry no suggestion.
    pub numeric: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<String>,
    pub low_confidence: bool,
}

/// Outcome of confirming a review.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Confirmation {
    /// Field key to confirmed value.
    pub values: BTreeMap<String, Decimal>,

    /// Numeric tokens with no label to attach to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unpaired: Vec<String>,

    /// Tokens recognized below the confidence threshold.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub low_confidence: Vec<String>,
}

impl Confirmation {
    /// Convert field keys to plan fields.
    pub fn plan_values(&self) -> Result<BTreeMap<PlanField, Decimal>, ValidationError> {
        self.values
            .iter()
            .map(|(key, value)| {
                PlanField::from_key(key)
                    .map(|field| (field, *value))
                    .ok_or_else(|| ValidationError::UnknownField(key.clone()))
            })
            .collect()
    }
}

/// Review state for a single OCR batch.
pub struct ReviewSession {
    tokens: Vec<Token>,
    catalog: FieldCatalog,
    suggested: Mapping,
    assignments: BTreeMap<String, String>,
    config: ReviewConfig,
}

impl ReviewSession {
    /// Start a review, seeding assignments with fresh suggestions.
    pub fn new(tokens: Vec<Token>, catalog: FieldCatalog) -> Self {
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        let suggested = FieldMatcher::new(catalog.clone()).suggest(&texts);
        Self::with_suggestions(tokens, catalog, suggested)
    }

    /// Start a review using a memoized match pass.
    pub fn from_cache(tokens: Vec<Token>, cache: &mut MatchCache) -> Self {
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        let suggested = cache.match_batch(&texts).clone();
        let catalog = cache.matcher().catalog().clone();
        Self::with_suggestions(tokens, catalog, suggested)
    }

    fn with_suggestions(tokens: Vec<Token>, catalog: FieldCatalog, suggested: Mapping) -> Self {
        let assignments = suggested.to_map();
        info!(
            "Review started: {} tokens, {} suggestions",
            tokens.len(),
            suggested.len()
        );
        Self {
            tokens,
            catalog,
            suggested,
            assignments,
            config: ReviewConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReviewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Suggestions as produced by the matcher, before any edits.
    pub fn suggested(&self) -> &Mapping {
        &self.suggested
    }

    /// Current field for a token.
    pub fn assignment(&self, token: &str) -> Option<&str> {
        self.assignments.get(token).map(String::as_str)
    }

    /// Assign a token to a field, replacing any suggestion.
    pub fn assign(&mut self, token: &str, field: &str) -> Result<(), ReviewError> {
        self.check_token(token)?;
        if !self.catalog.contains(field) {
            return Err(ReviewError::UnknownField(field.to_string()));
        }
        debug!("Assigned {:?} -> {}", token, field);
        self.assignments.insert(token.to_string(), field.to_string());
        Ok(())
    }

    /// Clear a token's assignment.
    pub fn unassign(&mut self, token: &str) -> Result<(), ReviewError> {
        self.check_token(token)?;
        self.assignments.remove(token);
        Ok(())
    }

    fn check_token(&self, token: &str) -> Result<(), ReviewError> {
        if self.tokens.iter().any(|t| t.text == token) {
            Ok(())
        } else {
            Err(ReviewError::UnknownToken(token.to_string()))
        }
    }

    /// Rows for display, in token order.
    pub fn rows(&self) -> Vec<ReviewRow> {
        self.tokens
            .iter()
            .map(|t| ReviewRow {
                text: t.text.clone(),
                confidence: t.confidence,
                numeric: is_numeric(&t.text),
                suggested: self.suggested.get(&t.text).map(str::to_string),
                assigned: self.assignment(&t.text).map(str::to_string),
                low_confidence: t.confidence < self.config.low_confidence,
            })
            .collect()
    }

    /// Pair values with labels and collect the confirmed figures.
    pub fn confirm(&self) -> Confirmation {
        let mut result = Confirmation::default();
        // field of the most recent label, and whether it already took a value
        let mut current: Option<(&str, bool)> = None;

        for token in &self.tokens {
            if token.confidence < self.config.low_confidence {
                result.low_confidence.push(token.text.clone());
            }

            let assigned = self.assignment(&token.text);
            if !is_numeric(&token.text) {
                if let Some(field) = assigned {
                    current = Some((field, false));
                }
                continue;
            }

            // a value too large or too small for a Decimal is reported, never dropped
            let Some(value) = leading_number(&token.text) else {
                warn!("Value {:?} is out of range", token.text);
                result.unpaired.push(token.text.clone());
                continue;
            };

            match (assigned, current.as_mut()) {
                (Some(field), _) => {
                    result.values.insert(field.to_string(), value);
                }
                (None, Some((field, taken))) => {
                    if *taken && self.config.pairing == PairingPolicy::First {
                        result.unpaired.push(token.text.clone());
                    } else {
                        result.values.insert(field.to_string(), value);
                        *taken = true;
                    }
                }
                (None, None) => result.unpaired.push(token.text.clone()),
            }
        }

        if !result.unpaired.is_empty() {
            warn!("{} values could not be paired: {:?}", result.unpaired.len(), result.unpaired);
        }
        if !result.low_confidence.is_empty() {
            warn!(
                "{} tokens below {}% confidence",
                result.low_confidence.len(),
                self.config.low_confidence
            );
        }
        info!("Confirmed {} field values", result.values.len());

        result
    }
}
