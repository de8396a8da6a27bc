//! Error types for the unit model and payload decoding

use thiserror::Error;

/// Errors raised when constructing unit-model values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("Unsupported sack size: {0}kg (expected 25 or 50)")]
    InvalidBostaSize(u32),

    #[error("Quantity field `{0}` cannot be negative")]
    NegativeQuantity(&'static str),
}

/// Errors raised when a backend payload cannot be decoded at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Malformed payload: {0}")]
    Malformed(String),
}
