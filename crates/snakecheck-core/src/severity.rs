//! Severity class and score

use serde::{Deserialize, Serialize};

/// Highest severity score; every error-class kind carries it
pub const MAX_SEVERITY: u8 = 5;

/// Scores above this are considered severe
pub const SEVERE_THRESHOLD: u8 = 1;

/// Coarse severity bucket, driving the printed level tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityClass {
    /// Suspicious code that still runs
    Warning,

    /// Code that will fail at runtime or could not be compiled
    Error,
}

impl SeverityClass {
    /// Level tag printed between brackets in rendered diagnostics
    pub fn tag(self) -> &'static str {
        match self {
            Self::Warning => "W",
            Self::Error => "E",
        }
    }
}

impl std::fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Whether a score should be escalated, independent of class
pub fn is_severe_score(score: u8) -> bool {
    score > SEVERE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags() {
        assert_eq!(SeverityClass::Warning.tag(), "W");
        assert_eq!(SeverityClass::Error.tag(), "E");
    }

    #[test]
    fn severe_threshold() {
        assert!(!is_severe_score(0));
        assert!(!is_severe_score(1));
        assert!(is_severe_score(2));
        assert!(is_severe_score(MAX_SEVERITY));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SeverityClass::Error).unwrap(), "\"error\"");
    }
}
