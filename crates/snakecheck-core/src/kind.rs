//! Diagnostic kinds and their message arguments

use serde::{Deserialize, Serialize};

use crate::code::{
    DiagnosticCode, COULD_NOT_COMPILE_BARE, COULD_NOT_COMPILE_FULL, COULD_NOT_COMPILE_MESSAGE,
};
use crate::location::SourceLocation;
use crate::message::MessageArg;

/// The closed set of problems the analysis engine can report
///
/// Each variant carries exactly the fields its message template needs.
/// Serialized with an internal `code` tag matching [`DiagnosticCode::as_str`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    /// `name` is imported but never used
    UnusedImport {
        /// Imported binding
        name: String,
    },

    /// `name` is rebound before its first binding was used
    RedefinedWhileUnused {
        /// Redefined binding
        name: String,
        /// Where the unused binding was made
        orig_loc: SourceLocation,
    },

    /// A loop variable rebinds the import `name`
    ImportShadowedByLoopVar {
        /// Shadowed import
        name: String,
        /// Where the import was made
        orig_loc: SourceLocation,
    },

    /// `from modname import *`
    ImportStarUsed {
        /// Module imported with a star
        modname: String,
    },

    /// `name` is referenced but never bound
    UndefinedName {
        /// Unbound name
        name: String,
    },

    /// `__all__` lists `name` but the module never binds it
    UndefinedExport {
        /// Exported name
        name: String,
    },

    /// Local `name` is read before assignment, shadowing an outer binding
    UndefinedLocal {
        /// Local name
        name: String,
        /// Where the enclosing scope binds it
        orig_loc: SourceLocation,
    },

    /// Two parameters of one function are both called `name`
    DuplicateArgument {
        /// Repeated parameter name
        name: String,
    },

    /// Function `name` is redefined before its first definition was used
    RedefinedFunction {
        /// Function name
        name: String,
        /// Where the first definition is
        orig_loc: SourceLocation,
    },

    /// The source could not be compiled
    CouldNotCompile {
        /// Compiler message, if any
        #[serde(default, skip_serializing_if = "Option::is_none")]
        msg: Option<String>,
        /// Offending source line, if any
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<String>,
    },

    /// `from __future__ import ...` after other statements
    LateFutureImport {
        /// Imported feature names, in source order
        names: Vec<String>,
    },

    /// Local `name` is assigned but never read
    UnusedVariable {
        /// Local name
        name: String,
    },
}

impl DiagnosticKind {
    /// The tag of this kind
    pub fn code(&self) -> DiagnosticCode {
        match self {
            Self::UnusedImport { .. } => DiagnosticCode::UnusedImport,
            Self::RedefinedWhileUnused { .. } => DiagnosticCode::RedefinedWhileUnused,
            Self::ImportShadowedByLoopVar { .. } => DiagnosticCode::ImportShadowedByLoopVar,
            Self::ImportStarUsed { .. } => DiagnosticCode::ImportStarUsed,
            Self::UndefinedName { .. } => DiagnosticCode::UndefinedName,
            Self::UndefinedExport { .. } => DiagnosticCode::UndefinedExport,
            Self::UndefinedLocal { .. } => DiagnosticCode::UndefinedLocal,
            Self::DuplicateArgument { .. } => DiagnosticCode::DuplicateArgument,
            Self::RedefinedFunction { .. } => DiagnosticCode::RedefinedFunction,
            Self::CouldNotCompile { .. } => DiagnosticCode::CouldNotCompile,
            Self::LateFutureImport { .. } => DiagnosticCode::LateFutureImport,
            Self::UnusedVariable { .. } => DiagnosticCode::UnusedVariable,
        }
    }

    /// Location of the earlier definition this kind refers to, if any
    pub fn orig_loc(&self) -> Option<SourceLocation> {
        match self {
            Self::RedefinedWhileUnused { orig_loc, .. }
            | Self::ImportShadowedByLoopVar { orig_loc, .. }
            | Self::UndefinedLocal { orig_loc, .. }
            | Self::RedefinedFunction { orig_loc, .. } => Some(*orig_loc),
            _ => None,
        }
    }

    /// Canonical form: empty compile-failure fields count as absent
    pub(crate) fn normalized(self) -> Self {
        match self {
            Self::CouldNotCompile { msg, line } => Self::CouldNotCompile {
                msg: msg.filter(|m| !m.is_empty()),
                line: line.filter(|l| !l.is_empty()),
            },
            other => other,
        }
    }

    /// The template this instance renders with
    pub fn template(&self) -> &'static str {
        match self {
            Self::CouldNotCompile { msg, line } => match (msg, line) {
                (Some(_), Some(_)) => COULD_NOT_COMPILE_FULL,
                (Some(_), None) => COULD_NOT_COMPILE_MESSAGE,
                (None, _) => COULD_NOT_COMPILE_BARE,
            },
            other => other.code().templates()[0],
        }
    }

    /// Arguments in the order [`template`](Self::template) expects them
    pub fn message_args(&self) -> Vec<MessageArg> {
        let quoted = |n: &String| MessageArg::Name(n.clone());
        match self {
            Self::UnusedImport { name: n }
            | Self::UndefinedName { name: n }
            | Self::UndefinedExport { name: n }
            | Self::DuplicateArgument { name: n }
            | Self::UnusedVariable { name: n } => vec![quoted(n)],
            Self::RedefinedWhileUnused { name: n, orig_loc }
            | Self::ImportShadowedByLoopVar { name: n, orig_loc }
            | Self::UndefinedLocal { name: n, orig_loc }
            | Self::RedefinedFunction { name: n, orig_loc } => {
                vec![quoted(n), MessageArg::Line(orig_loc.line)]
            }
            Self::ImportStarUsed { modname } => vec![MessageArg::Text(modname.clone())],
            Self::LateFutureImport { names } => vec![MessageArg::Names(names.clone())],
            Self::CouldNotCompile { msg, line } => match (msg, line) {
                (Some(msg), Some(line)) => {
                    vec![MessageArg::Text(msg.clone()), MessageArg::Text(line.clone())]
                }
                (Some(msg), None) => vec![MessageArg::Text(msg.clone())],
                (None, _) => Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::substitute;
    use pretty_assertions::assert_eq;

    fn line(n: u32) -> SourceLocation {
        SourceLocation::new(n)
    }

    fn samples() -> Vec<DiagnosticKind> {
        vec![
            DiagnosticKind::UnusedImport { name: "os".into() },
            DiagnosticKind::RedefinedWhileUnused { name: "foo".into(), orig_loc: line(2) },
            DiagnosticKind::ImportShadowedByLoopVar { name: "i".into(), orig_loc: line(1) },
            DiagnosticKind::ImportStarUsed { modname: "os".into() },
            DiagnosticKind::UndefinedName { name: "x".into() },
            DiagnosticKind::UndefinedExport { name: "y".into() },
            DiagnosticKind::UndefinedLocal { name: "z".into(), orig_loc: line(4) },
            DiagnosticKind::DuplicateArgument { name: "a".into() },
            DiagnosticKind::RedefinedFunction { name: "f".into(), orig_loc: line(9) },
            DiagnosticKind::CouldNotCompile { msg: Some("m".into()), line: Some("l".into()) },
            DiagnosticKind::CouldNotCompile { msg: Some("m".into()), line: None },
            DiagnosticKind::CouldNotCompile { msg: None, line: None },
            DiagnosticKind::LateFutureImport { names: vec!["division".into()] },
            DiagnosticKind::UnusedVariable { name: "tmp".into() },
        ]
    }

    fn message(kind: &DiagnosticKind) -> String {
        substitute(kind.template(), &kind.message_args())
    }

    #[test]
    fn arity_matches_template_for_every_kind() {
        for kind in samples() {
            let placeholders = kind.template().matches("{}").count();
            assert_eq!(placeholders, kind.message_args().len(), "{:?}", kind.code());
        }
    }

    #[test]
    fn samples_cover_every_code() {
        let codes: Vec<DiagnosticCode> = samples().iter().map(DiagnosticKind::code).collect();
        for code in DiagnosticCode::ALL {
            assert!(codes.contains(&code), "{code} missing from samples");
        }
    }

    #[test]
    fn late_future_import_lists_names() {
        let kind = DiagnosticKind::LateFutureImport {
            names: vec!["division".into(), "print_function".into()],
        };
        assert_eq!(
            message(&kind),
            "future import(s) ['division', 'print_function'] after other statements"
        );
    }

    #[test]
    fn late_future_import_keeps_name_boundaries() {
        let joined = DiagnosticKind::LateFutureImport { names: vec!["a, b".into()] };
        let split = DiagnosticKind::LateFutureImport { names: vec!["a".into(), "b".into()] };
        assert_eq!(message(&joined), "future import(s) ['a, b'] after other statements");
        assert_eq!(message(&split), "future import(s) ['a', 'b'] after other statements");
        assert_ne!(message(&joined), message(&split));
    }

    #[test]
    fn orig_loc_keeps_column() {
        let kind = DiagnosticKind::UndefinedLocal {
            name: "n".into(),
            orig_loc: SourceLocation::with_column(3, 8),
        };
        assert_eq!(kind.orig_loc(), Some(SourceLocation::with_column(3, 8)));
        assert_eq!(message(&kind), "local variable 'n' (defined in enclosing scope on line 3) referenced before assignment");
        assert_eq!(DiagnosticKind::UndefinedName { name: "n".into() }.orig_loc(), None);
    }

    #[test]
    fn line_without_message_is_bare() {
        let kind = DiagnosticKind::CouldNotCompile { msg: None, line: Some("x==".into()) };
        assert_eq!(kind.template(), "could not compile");
        assert!(kind.message_args().is_empty());
    }

    #[test]
    fn normalization_treats_empty_as_absent() {
        let kind = DiagnosticKind::CouldNotCompile {
            msg: Some("bad syntax".into()),
            line: Some(String::new()),
        }
        .normalized();
        assert_eq!(
            kind,
            DiagnosticKind::CouldNotCompile { msg: Some("bad syntax".into()), line: None }
        );
        assert_eq!(kind.template(), "could not compile: {}");
    }

    #[test]
    fn tagged_json_shape() {
        let kind = DiagnosticKind::RedefinedWhileUnused {
            name: "foo".into(),
            orig_loc: SourceLocation::with_column(2, 4),
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "REDEFINED_WHILE_UNUSED",
                "name": "foo",
                "orig_loc": {"line": 2, "column": 4}
            })
        );

        let bare: DiagnosticKind = serde_json::from_str(r#"{"code":"COULD_NOT_COMPILE"}"#).unwrap();
        assert_eq!(bare, DiagnosticKind::CouldNotCompile { msg: None, line: None });
    }
}
