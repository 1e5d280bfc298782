//! Error and diagnostic system for the Evtree parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors and warnings
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in [`ParseError`]
//! for returning from the extraction pipeline.
//!
//! # Example
//!
//! ```
//! # use evtree_parser::error::{Diagnostic, ErrorCode};
//! # use evtree_parser::Span;
//!
//! let span = Span::new(120..160);
//! let first_span = Span::new(20..60);
//!
//! let diag = Diagnostic::warning("event tree `LOCA` is defined multiple times")
//!     .with_code(ErrorCode::E101)
//!     .with_label(span, "ignored definition")
//!     .with_secondary_label(first_span, "first defined here")
//!     .with_help("rename or remove the duplicate definition");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
