//! Diagnostic code registry
//!
//! Codes are STABLE: the string form appears in reports and config files.
//! Never rename or remove a code, only add new ones.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::location::ColumnPolicy;
use crate::severity::{SeverityClass, MAX_SEVERITY};

/// Tag identifying a diagnostic kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    // Imports
    /// A module or name is imported but never referenced
    UnusedImport,

    /// A binding is redefined before its first use
    RedefinedWhileUnused,

    /// A loop variable shadows an import
    ImportShadowedByLoopVar,

    /// A star import hides which names are defined
    ImportStarUsed,

    /// A `__future__` import follows other statements
    LateFutureImport,

    // Names
    /// A name is referenced but never bound
    UndefinedName,

    /// `__all__` lists a name the module never binds
    UndefinedExport,

    /// A local is read before assignment while shadowing an outer binding
    UndefinedLocal,

    /// A local is assigned but never read
    UnusedVariable,

    // Definitions
    /// Two parameters of one function share a name
    DuplicateArgument,

    /// A function is redefined before its first use
    RedefinedFunction,

    // Syntax
    /// The source could not be compiled at all
    CouldNotCompile,
}

/// Static definition of a kind: severity class, score and column policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindSpec {
    /// Coarse class, drives the `W`/`E` tag
    pub class: SeverityClass,

    /// Numeric rank, drives escalation
    pub score: u8,

    /// Whether column offsets are kept
    pub column: ColumnPolicy,
}

impl KindSpec {
    const fn warning(score: u8) -> Self {
        Self {
            class: SeverityClass::Warning,
            score,
            column: ColumnPolicy::Reported,
        }
    }

    const fn error() -> Self {
        Self {
            class: SeverityClass::Error,
            score: MAX_SEVERITY,
            column: ColumnPolicy::Reported,
        }
    }

    const fn line_only(self) -> Self {
        Self {
            column: ColumnPolicy::Suppressed,
            ..self
        }
    }
}

impl DiagnosticCode {
    /// Every code, in catalog order
    pub const ALL: [DiagnosticCode; 12] = [
        Self::UnusedImport,
        Self::RedefinedWhileUnused,
        Self::ImportShadowedByLoopVar,
        Self::ImportStarUsed,
        Self::UndefinedName,
        Self::UndefinedExport,
        Self::UndefinedLocal,
        Self::DuplicateArgument,
        Self::RedefinedFunction,
        Self::CouldNotCompile,
        Self::LateFutureImport,
        Self::UnusedVariable,
    ];

    /// Get the code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnusedImport => "UNUSED_IMPORT",
            Self::RedefinedWhileUnused => "REDEFINED_WHILE_UNUSED",
            Self::ImportShadowedByLoopVar => "IMPORT_SHADOWED_BY_LOOP_VAR",
            Self::ImportStarUsed => "IMPORT_STAR_USED",
            Self::LateFutureImport => "LATE_FUTURE_IMPORT",
            Self::UndefinedName => "UNDEFINED_NAME",
            Self::UndefinedExport => "UNDEFINED_EXPORT",
            Self::UndefinedLocal => "UNDEFINED_LOCAL",
            Self::UnusedVariable => "UNUSED_VARIABLE",
            Self::DuplicateArgument => "DUPLICATE_ARGUMENT",
            Self::RedefinedFunction => "REDEFINED_FUNCTION",
            Self::CouldNotCompile => "COULD_NOT_COMPILE",
        }
    }

    /// Static severity and column definition for this kind
    pub const fn spec(self) -> KindSpec {
        match self {
            Self::UnusedImport => KindSpec::warning(0).line_only(),
            Self::RedefinedWhileUnused => KindSpec::warning(1),
            Self::ImportShadowedByLoopVar => KindSpec::warning(2),
            Self::ImportStarUsed => KindSpec::warning(0),
            Self::LateFutureImport => KindSpec::warning(1),
            Self::UnusedVariable => KindSpec::warning(3),
            Self::RedefinedFunction => KindSpec::warning(2),
            Self::UndefinedName
            | Self::UndefinedExport
            | Self::UndefinedLocal
            | Self::DuplicateArgument
            | Self::CouldNotCompile => KindSpec::error(),
        }
    }

    /// Message templates this kind may render with
    ///
    /// One template for every kind except `CouldNotCompile`, which picks
    /// between full, message-only and bare forms.
    pub fn templates(self) -> &'static [&'static str] {
        match self {
            Self::UnusedImport => &["{} imported but unused"],
            Self::RedefinedWhileUnused => &["redefinition of unused {} from line {}"],
            Self::ImportShadowedByLoopVar => &["import {} from line {} shadowed by loop variable"],
            Self::ImportStarUsed => &["'from {} import *' used; unable to detect undefined names"],
            Self::LateFutureImport => &["future import(s) {} after other statements"],
            Self::UndefinedName => &["undefined name {}"],
            Self::UndefinedExport => &["undefined name {} in __all__"],
            Self::UndefinedLocal => &[
                "local variable {} (defined in enclosing scope on line {}) referenced before assignment",
            ],
            Self::UnusedVariable => &["local variable {} is assigned to but never used"],
            Self::DuplicateArgument => &["duplicate argument {} in function definition"],
            Self::RedefinedFunction => &["redefinition of function {} from line {}"],
            Self::CouldNotCompile => &[
                COULD_NOT_COMPILE_FULL,
                COULD_NOT_COMPILE_MESSAGE,
                COULD_NOT_COMPILE_BARE,
            ],
        }
    }
}

pub(crate) const COULD_NOT_COMPILE_FULL: &str = "could not compile: {}\n{}";
pub(crate) const COULD_NOT_COMPILE_MESSAGE: &str = "could not compile: {}";
pub(crate) const COULD_NOT_COMPILE_BARE: &str = "could not compile";

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string names no known diagnostic code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diagnostic code: {0}")]
pub struct ParseCodeError(pub String);

impl FromStr for DiagnosticCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == wanted)
            .ok_or_else(|| ParseCodeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_stability() {
        assert_eq!(DiagnosticCode::UnusedImport.as_str(), "UNUSED_IMPORT");
        assert_eq!(DiagnosticCode::ImportShadowedByLoopVar.as_str(), "IMPORT_SHADOWED_BY_LOOP_VAR");
        assert_eq!(DiagnosticCode::CouldNotCompile.as_str(), "COULD_NOT_COMPILE");
    }

    #[test]
    fn serde_name_matches_as_str() {
        for code in DiagnosticCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn errors_carry_max_score_and_warnings_never_do() {
        for code in DiagnosticCode::ALL {
            let spec = code.spec();
            match spec.class {
                SeverityClass::Error => assert_eq!(spec.score, MAX_SEVERITY, "{code}"),
                SeverityClass::Warning => assert!(spec.score < MAX_SEVERITY, "{code}"),
            }
        }
    }

    #[test]
    fn reference_scores() {
        let scores: Vec<u8> = DiagnosticCode::ALL.iter().map(|c| c.spec().score).collect();
        assert_eq!(scores, vec![0, 1, 2, 0, 5, 5, 5, 5, 2, 5, 1, 3]);
    }

    #[test]
    fn only_unused_import_is_line_only() {
        for code in DiagnosticCode::ALL {
            let expected = if code == DiagnosticCode::UnusedImport {
                ColumnPolicy::Suppressed
            } else {
                ColumnPolicy::Reported
            };
            assert_eq!(code.spec().column, expected, "{code}");
        }
    }

    #[test]
    fn every_kind_has_a_template() {
        for code in DiagnosticCode::ALL {
            assert!(!code.templates().is_empty());
            assert!(code.templates().iter().all(|t| !t.is_empty()));
        }
        assert_eq!(DiagnosticCode::CouldNotCompile.templates().len(), 3);
    }

    #[test]
    fn parse_from_str() {
        assert_eq!("UNUSED_IMPORT".parse::<DiagnosticCode>(), Ok(DiagnosticCode::UnusedImport));
        assert_eq!("unused-variable".parse::<DiagnosticCode>(), Ok(DiagnosticCode::UnusedVariable));
        assert_eq!(
            "NOPE".parse::<DiagnosticCode>(),
            Err(ParseCodeError("NOPE".to_string()))
        );
    }
}
