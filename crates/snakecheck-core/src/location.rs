//! Source positions attached to diagnostics

use serde::{Deserialize, Serialize};

/// A position in an analyzed source file
///
/// Produced by the parser for the statement or expression a diagnostic
/// points at. Lines are 1-indexed, but only the constructors check that,
/// and only in debug builds. Line 0 arriving through the public fields or
/// through deserialization is kept and rendered as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: u32,

    /// Column offset (0-indexed), when the parser reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl SourceLocation {
    /// Create a location with just a line number
    pub fn new(line: u32) -> Self {
        debug_assert!(line >= 1, "source lines are 1-indexed");
        Self { line, column: None }
    }

    /// Create a location with line and column
    pub fn with_column(line: u32, column: u32) -> Self {
        debug_assert!(line >= 1, "source lines are 1-indexed");
        Self {
            line,
            column: Some(column),
        }
    }

    /// Return this location as seen through a kind's column policy
    pub fn under(self, policy: ColumnPolicy) -> Self {
        match policy {
            ColumnPolicy::Reported => self,
            ColumnPolicy::Suppressed => Self {
                line: self.line,
                column: None,
            },
        }
    }
}

/// Whether a diagnostic kind reports column offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPolicy {
    /// Keep the column the parser supplied
    Reported,

    /// Line granularity only
    Suppressed,
}

impl std::fmt::Display for ColumnPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reported => write!(f, "line+column"),
            Self::Suppressed => write!(f, "line"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppressed_policy_drops_column() {
        let loc = SourceLocation::with_column(7, 12);
        assert_eq!(loc.under(ColumnPolicy::Suppressed), SourceLocation::new(7));
        assert_eq!(loc.under(ColumnPolicy::Reported), loc);
    }

    #[test]
    fn ordering_puts_missing_column_first() {
        assert!(SourceLocation::new(3) < SourceLocation::with_column(3, 0));
        assert!(SourceLocation::with_column(3, 9) < SourceLocation::new(4));
    }

    #[test]
    fn column_omitted_from_json_when_absent() {
        let json = serde_json::to_string(&SourceLocation::new(5)).unwrap();
        assert_eq!(json, r#"{"line":5}"#);

        let back: SourceLocation = serde_json::from_str(r#"{"line":5,"column":2}"#).unwrap();
        assert_eq!(back, SourceLocation::with_column(5, 2));
    }

    #[test]
    fn line_zero_is_not_rejected_on_input() {
        let loc: SourceLocation = serde_json::from_str(r#"{"line":0}"#).unwrap();
        assert_eq!(loc, SourceLocation { line: 0, column: None });
    }
}
