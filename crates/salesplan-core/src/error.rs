//! Error types for the salesplan-core library.

use thiserror::Error;

/// Main error type for the salesplan library.
#[derive(Error, Debug)]
pub enum SalesPlanError {
    /// Input validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Review/confirmation error.
    #[error("review error: {0}")]
    Review(#[from] ReviewError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised when store, plan or revenue records are malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field is missing or blank.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Month is not in `YYYY-MM` form.
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// A plan target is below zero.
    #[error("plan value for {field} is negative: {value}")]
    NegativePlanValue { field: String, value: String },

    /// A revenue entry must be strictly positive.
    #[error("revenue amount must be positive, got {0}")]
    NonPositiveAmount(String),

    /// Sum of revenue amounts exceeds the representable range.
    #[error("revenue total overflows after {0} entries")]
    TotalOverflow(usize),

    /// Unknown plan field key.
    #[error("unknown plan field: {0}")]
    UnknownField(String),
}

/// Errors raised while an operator edits suggested mappings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReviewError {
    /// The token is not part of the reviewed batch.
    #[error("token not in batch: {0}")]
    UnknownToken(String),

    /// The field is not part of the catalog used for the batch.
    #[error("field not in catalog: {0}")]
    UnknownField(String),
}

/// Result type for the salesplan library.
pub type Result<T> = std::result::Result<T, SalesPlanError>;
