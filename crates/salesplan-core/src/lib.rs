//! Core library for retail sales plan processing.
//!
//! This crate provides:
//! - Fuzzy matching of OCR tokens to plan fields (Levenshtein similarity)
//! - Operator review that pairs recognized values with their labels
//! - Store directory, monthly plan and revenue models
//! - Revenue summary statistics

pub mod error;
pub mod matching;
pub mod models;
pub mod review;

pub use error::{Result, ReviewError, SalesPlanError, ValidationError};
pub use matching::{
    suggest_mappings, CatalogField, FieldCatalog, FieldMatch, FieldMatcher, Mapping, MatchCache,
    Token,
};
pub use models::config::SalesPlanConfig;
pub use models::plan::{MonthlyPlan, PlanField, PlanGroup, PlanValues};
pub use models::revenue::{Revenue, SummaryStats};
pub use models::store::{NewStore, Store};
pub use review::{Confirmation, ReviewRow, ReviewSession};
