//! Report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use serde::{Deserialize, Serialize};
use snakecheck_core::{Diagnostic, DiagnosticCode, SeverityClass, SourceLocation};

use crate::config::{Config, FailPolicy};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total number of diagnostics kept
    pub total: usize,

    /// Number of error-class diagnostics
    pub errors: usize,

    /// Number of warning-class diagnostics
    pub warnings: usize,

    /// Number of diagnostics with a severe score, of either class
    pub severe: usize,

    /// Number of distinct files with at least one diagnostic
    pub files: usize,

    /// Number of diagnostics dropped by the `ignore` list
    pub ignored: usize,
}

/// A diagnostic together with the values consumers usually want precomputed
///
/// Only `diagnostic` is read back when deserializing; every other field is
/// recomputed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct ReportEntry {
    /// The diagnostic itself
    pub diagnostic: Diagnostic,

    /// Stable code of the diagnostic's kind
    pub code: DiagnosticCode,

    /// Warning or error
    pub severity: SeverityClass,

    /// Numeric severity score
    pub score: u8,

    /// Whether the score makes this diagnostic severe
    pub severe: bool,

    /// Message without file or location
    pub message: String,

    /// Full rendered line
    pub rendered: String,
}

#[derive(Deserialize)]
struct RawEntry {
    diagnostic: Diagnostic,
}

impl From<RawEntry> for ReportEntry {
    fn from(raw: RawEntry) -> Self {
        ReportEntry::from(raw.diagnostic)
    }
}

impl From<Diagnostic> for ReportEntry {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            code: diagnostic.code(),
            severity: diagnostic.severity_class(),
            score: diagnostic.severity_score(),
            severe: diagnostic.is_severe(),
            message: diagnostic.message(),
            rendered: diagnostic.render(),
            diagnostic,
        }
    }
}

/// Check report (report.json v1)
///
/// Entries are kept ordered by file, location and code, without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Summary statistics
    pub summary: ReportSummary,

    /// All kept diagnostics, in report order
    pub entries: Vec<ReportEntry>,
}

fn sort_key(diagnostic: &Diagnostic) -> (&str, SourceLocation, DiagnosticCode) {
    (diagnostic.filename(), diagnostic.location(), diagnostic.code())
}

impl Report {
    /// Create a new empty report
    pub fn new() -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            summary: ReportSummary::default(),
            entries: Vec::new(),
        }
    }

    /// Create a report from diagnostics, applying the config's ignore list
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>, config: &Config) -> Self {
        let mut report = Self::new();

        for diagnostic in diagnostics {
            if config.is_ignored(diagnostic.code()) {
                tracing::trace!(code = %diagnostic.code(), file = diagnostic.filename(), "ignored");
                report.summary.ignored += 1;
                continue;
            }
            report.add_diagnostic(diagnostic);
        }

        tracing::debug!(
            total = report.summary.total,
            errors = report.summary.errors,
            warnings = report.summary.warnings,
            severe = report.summary.severe,
            ignored = report.summary.ignored,
            "report built"
        );
        report
    }

    /// Add a diagnostic in report order
    ///
    /// Returns `false` if an identical diagnostic is already present.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) -> bool {
        let key = sort_key(&diagnostic);
        let start = self.entries.partition_point(|e| sort_key(&e.diagnostic) < key);
        let end = self.entries.partition_point(|e| sort_key(&e.diagnostic) <= key);

        if self.entries[start..end].iter().any(|e| e.diagnostic == diagnostic) {
            tracing::trace!(rendered = %diagnostic, "duplicate diagnostic dropped");
            return false;
        }

        // Entries for one file are contiguous, so only the neighbours can share it.
        let same_file = |i: usize| {
            self.entries
                .get(i)
                .is_some_and(|e| e.diagnostic.filename() == diagnostic.filename())
        };
        let new_file = !(end.checked_sub(1).is_some_and(same_file) || same_file(end));

        match diagnostic.severity_class() {
            SeverityClass::Error => self.summary.errors += 1,
            SeverityClass::Warning => self.summary.warnings += 1,
        }
        if diagnostic.is_severe() {
            self.summary.severe += 1;
        }
        if new_file {
            self.summary.files += 1;
        }
        self.summary.total += 1;

        self.entries.insert(end, ReportEntry::from(diagnostic));
        true
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// Check if the report has any severe diagnostics
    pub fn has_severe(&self) -> bool {
        self.summary.severe > 0
    }

    /// Whether a run producing this report should exit non-zero
    pub fn should_fail(&self, policy: FailPolicy) -> bool {
        match policy {
            FailPolicy::Never => false,
            FailPolicy::Error => self.has_errors(),
            FailPolicy::Severe => self.has_severe(),
            FailPolicy::Any => self.summary.total > 0,
        }
    }

    /// Rendered diagnostic lines, in report order
    pub fn render_lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.rendered.clone()).collect()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "report written");
        Ok(())
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

/// Report error types
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
