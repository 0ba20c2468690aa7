//! Error types.
//!
//! Unresolved applicants are a normal outcome of allocation and never
//! surface here.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors produced by the allocation framework.
#[derive(Debug, Error)]
pub enum AllocError {
    /// A slot space whose upper bound does not exceed its lower bound.
    #[error("invalid range: [{lo}, {hi}] (upper bound must exceed lower bound)")]
    InvalidRange { lo: i64, hi: i64 },

    /// A count that must be positive was zero.
    #[error("invalid count: {0}")]
    InvalidCount(String),

    /// A strategy name that matches no built-in strategy.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// A scenario or a strategy run broke an integrity check.
    #[error("{context} failed validation: {}", summarize(.errors))]
    Validation {
        context: String,
        errors: Vec<ValidationError>,
    },

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, AllocError>;
