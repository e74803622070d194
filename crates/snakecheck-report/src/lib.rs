//! snakecheck reporting layer
//!
//! Collects diagnostics produced by the analysis engine, applies the
//! project configuration, and produces a stable report (text or JSON).
//! Ordering, deduplication and exit policy live here, not in the core.

pub mod config;
pub mod report;

pub use config::{Config, ConfigError, FailPolicy, OutputFormat};
pub use report::{Report, ReportEntry, ReportError, ReportSummary, ReportVersion};
