//! The diagnostic envelope: file, location, kind, and rendering
//!
//! A [`Diagnostic`] is created once by the analysis engine and never mutated.
//! Severity and column reporting come from the kind's static [`KindSpec`];
//! callers cannot override them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::code::{DiagnosticCode, KindSpec};
use crate::kind::DiagnosticKind;
use crate::location::SourceLocation;
use crate::message::{substitute, MessageArg};
use crate::severity::{is_severe_score, SeverityClass};

/// One detected problem in an analyzed source file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDiagnostic")]
pub struct Diagnostic {
    filename: String,
    location: SourceLocation,
    kind: DiagnosticKind,
}

/// Wire shape; deserialization re-runs construction so column policy holds
#[derive(Deserialize)]
struct RawDiagnostic {
    filename: String,
    location: SourceLocation,
    kind: DiagnosticKind,
}

impl From<RawDiagnostic> for Diagnostic {
    fn from(raw: RawDiagnostic) -> Self {
        Diagnostic::new(raw.kind, raw.filename, raw.location)
    }
}

impl Diagnostic {
    /// Create a diagnostic of any kind
    ///
    /// The column is dropped when the kind reports line granularity only.
    pub fn new(kind: DiagnosticKind, filename: impl Into<String>, location: SourceLocation) -> Self {
        let kind = kind.normalized();
        let location = location.under(kind.code().spec().column);
        Self {
            filename: filename.into(),
            location,
            kind,
        }
    }

    /// `'name' imported but unused`; the column is always dropped
    pub fn unused_import(filename: impl Into<String>, loc: SourceLocation, name: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::UnusedImport { name: name.into() }, filename, loc)
    }

    /// `redefinition of unused 'name' from line N`
    pub fn redefined_while_unused(
        filename: impl Into<String>,
        loc: SourceLocation,
        name: impl Into<String>,
        orig_loc: SourceLocation,
    ) -> Self {
        let kind = DiagnosticKind::RedefinedWhileUnused {
            name: name.into(),
            orig_loc,
        };
        Self::new(kind, filename, loc)
    }

    /// `import 'name' from line N shadowed by loop variable`
    pub fn import_shadowed_by_loop_var(
        filename: impl Into<String>,
        loc: SourceLocation,
        name: impl Into<String>,
        orig_loc: SourceLocation,
    ) -> Self {
        let kind = DiagnosticKind::ImportShadowedByLoopVar {
            name: name.into(),
            orig_loc,
        };
        Self::new(kind, filename, loc)
    }

    /// `'from modname import *' used`; the module is shown unquoted
    pub fn import_star_used(filename: impl Into<String>, loc: SourceLocation, modname: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::ImportStarUsed { modname: modname.into() }, filename, loc)
    }

    /// `undefined name 'name'`
    pub fn undefined_name(filename: impl Into<String>, loc: SourceLocation, name: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::UndefinedName { name: name.into() }, filename, loc)
    }

    /// `undefined name 'name' in __all__`
    pub fn undefined_export(filename: impl Into<String>, loc: SourceLocation, name: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::UndefinedExport { name: name.into() }, filename, loc)
    }

    /// Local read before assignment while an enclosing scope binds it at `orig_loc`
    pub fn undefined_local(
        filename: impl Into<String>,
        loc: SourceLocation,
        name: impl Into<String>,
        orig_loc: SourceLocation,
    ) -> Self {
        let kind = DiagnosticKind::UndefinedLocal {
            name: name.into(),
            orig_loc,
        };
        Self::new(kind, filename, loc)
    }

    /// `duplicate argument 'name' in function definition`
    pub fn duplicate_argument(filename: impl Into<String>, loc: SourceLocation, name: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::DuplicateArgument { name: name.into() }, filename, loc)
    }

    /// `redefinition of function 'name' from line N`
    pub fn redefined_function(
        filename: impl Into<String>,
        loc: SourceLocation,
        name: impl Into<String>,
        orig_loc: SourceLocation,
    ) -> Self {
        let kind = DiagnosticKind::RedefinedFunction {
            name: name.into(),
            orig_loc,
        };
        Self::new(kind, filename, loc)
    }

    /// Compile failure; the template depends on which of `msg`/`line` are given
    pub fn could_not_compile(
        filename: impl Into<String>,
        loc: SourceLocation,
        msg: Option<String>,
        line: Option<String>,
    ) -> Self {
        Self::new(DiagnosticKind::CouldNotCompile { msg, line }, filename, loc)
    }

    /// `future import(s) [...] after other statements`, names in source order
    pub fn late_future_import(filename: impl Into<String>, loc: SourceLocation, names: Vec<String>) -> Self {
        Self::new(DiagnosticKind::LateFutureImport { names }, filename, loc)
    }

    /// `local variable 'name' is assigned to but never used`
    pub fn unused_variable(filename: impl Into<String>, loc: SourceLocation, name: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::UnusedVariable { name: name.into() }, filename, loc)
    }

    /// Path of the analyzed file
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Location, with the column already filtered by the kind's policy
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// The kind with its arguments
    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    /// Stable code of the kind
    pub fn code(&self) -> DiagnosticCode {
        self.kind.code()
    }

    fn spec(&self) -> KindSpec {
        self.code().spec()
    }

    /// Warning or error, fixed by the kind
    pub fn severity_class(&self) -> SeverityClass {
        self.spec().class
    }

    /// Numeric rank in `0..=MAX_SEVERITY`, fixed by the kind
    pub fn severity_score(&self) -> u8 {
        self.spec().score
    }

    /// Whether this diagnostic should be escalated (score above 1)
    pub fn is_severe(&self) -> bool {
        is_severe_score(self.severity_score())
    }

    /// Arguments in template order
    pub fn message_args(&self) -> Vec<MessageArg> {
        self.kind.message_args()
    }

    /// The kind's template with its arguments substituted
    pub fn message(&self) -> String {
        substitute(self.kind.template(), &self.kind.message_args())
    }

    /// Render as `file:line(col): [T] message`, or `file:line: [T] message`
    /// when no column is reported
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.severity_class().tag();
        match self.location.column {
            Some(col) => write!(
                f,
                "{}:{}({}): [{}] {}",
                self.filename,
                self.location.line,
                col,
                tag,
                self.message()
            ),
            None => write!(
                f,
                "{}:{}: [{}] {}",
                self.filename,
                self.location.line,
                tag,
                self.message()
            ),
        }
    }
}
