//! Fuzzy matching of OCR tokens to plan fields.

mod cache;
mod catalog;
mod matcher;
pub mod numeric;
pub mod similarity;
mod token;

pub use cache::MatchCache;
pub use catalog::{CatalogField, FieldCatalog};
pub use matcher::{suggest_mappings, FieldMatch, FieldMatcher, Mapping, ACCEPT_THRESHOLD};
pub use numeric::{is_numeric, leading_number};
pub use similarity::{levenshtein_distance, similarity};
pub use token::{load_tokens, parse_tokens, BoundingBox, Token};
