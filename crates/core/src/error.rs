//! Domain error model.

use thiserror::Error;

/// Result type used for input validation across the domain layer.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation failure for a user intent (add / edit).
///
/// These are deterministic input problems; the store is never contacted when
/// one of them is raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The trimmed item name is empty.
    #[error("item name cannot be empty")]
    EmptyName,

    /// The quantity text has no numeric prefix.
    #[error("quantity is not a number: {0:?}")]
    NotANumber(String),

    /// An add was submitted with a quantity of exactly zero.
    #[error("quantity cannot be zero")]
    ZeroQuantity,

    /// An item identifier was blank or malformed.
    #[error("invalid item id: {0:?}")]
    InvalidId(String),
}

impl ValidationError {
    pub fn not_a_number(text: impl Into<String>) -> Self {
        Self::NotANumber(text.into())
    }

    /// Stable machine-readable code (used in API responses and log fields).
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "empty_name",
            ValidationError::NotANumber(_) => "not_a_number",
            ValidationError::ZeroQuantity => "zero_quantity",
            ValidationError::InvalidId(_) => "invalid_id",
        }
    }
}
