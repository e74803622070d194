//! snakecheck core
//!
//! The diagnostic model shared by the analysis engine and every report consumer.
//! Diagnostic codes and message templates are part of the public contract:
//! never rename a code or reword a template, only add new ones.
//!
//! Nothing in this crate performs I/O or keeps state between calls.

pub mod code;
pub mod diagnostic;
pub mod kind;
pub mod location;
pub mod message;
pub mod severity;

pub use code::{DiagnosticCode, KindSpec, ParseCodeError};
pub use diagnostic::Diagnostic;
pub use kind::DiagnosticKind;
pub use location::{ColumnPolicy, SourceLocation};
pub use message::MessageArg;
pub use severity::{SeverityClass, MAX_SEVERITY};
