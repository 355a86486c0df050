use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A suggested recipe, as displayed.
///
/// `text` is the first completion returned by the service, verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub text: String,
    pub ingredients: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(text: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            text: text.into(),
            ingredients,
            generated_at: Utc::now(),
        }
    }
}

/// Machine-readable failure category reported by the completion service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionErrorKind {
    /// Account quota or billing limit exhausted.
    Quota,
    /// The requested model is deprecated or does not exist.
    ModelNotFound,
    Other,
}

impl SuggestionErrorKind {
    /// Map a service error code (e.g. `insufficient_quota`) to a category.
    pub fn from_code(code: &str) -> Self {
        match code {
            "insufficient_quota" => SuggestionErrorKind::Quota,
            "model_not_found" => SuggestionErrorKind::ModelNotFound,
            _ => SuggestionErrorKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionErrorKind::Quota => "insufficient_quota",
            SuggestionErrorKind::ModelNotFound => "model_not_found",
            SuggestionErrorKind::Other => "other",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("recipe suggestion failed ({}): {message}", .kind.as_str())]
pub struct SuggestionError {
    pub kind: SuggestionErrorKind,
    pub message: String,
}

impl SuggestionError {
    pub fn new(kind: SuggestionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn quota(message: impl Into<String>) -> Self {
        Self::new(SuggestionErrorKind::Quota, message)
    }

    pub fn model_not_found(message: impl Into<String>) -> Self {
        Self::new(SuggestionErrorKind::ModelNotFound, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(SuggestionErrorKind::Other, message)
    }

    /// Build from an optional service error code.
    pub fn from_code(code: Option<&str>, message: impl Into<String>) -> Self {
        let kind = code
            .map(SuggestionErrorKind::from_code)
            .unwrap_or(SuggestionErrorKind::Other);
        Self::new(kind, message)
    }
}
