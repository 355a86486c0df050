//! Failure reporting policy.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Whether failures are returned to the caller after being logged.
///
/// - `Suppress`: log and report the operation as ignored/failed in its outcome.
/// - `Surface`: log and return the error.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Suppress,
    Surface,
}

impl FailurePolicy {
    pub fn surfaces(self) -> bool {
        self == FailurePolicy::Surface
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Suppress => "suppress",
            FailurePolicy::Surface => "surface",
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "suppress" => Ok(FailurePolicy::Suppress),
            "surface" => Ok(FailurePolicy::Surface),
            other => Err(format!(
                "unknown failure policy {other:?} (expected one of: suppress, surface)"
            )),
        }
    }
}
