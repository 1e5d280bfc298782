//! The ParseError type for wrapping extraction diagnostics.
//!
//! [`ParseError`] wraps one or more [`Diagnostic`]s produced while reading a
//! document, locating an event tree, or enumerating its sequences.

use std::fmt;

use crate::error::{Diagnostic, ErrorCode};

/// Error type for the extraction pipeline.
///
/// Wraps one or more diagnostics. At least one of them is an error; the rest
/// may be warnings collected before the failure.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Code of the first error-severity diagnostic, if it has one.
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.diagnostics
            .iter()
            .find(|diag| diag.severity().is_error())
            .and_then(Diagnostic::code)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self
            .diagnostics
            .iter()
            .filter(|diag| diag.severity().is_error());
        if let Some(first) = errors.next() {
            write!(f, "{}", first)?;
            let more = errors.count();
            if more > 0 {
                write!(f, " (+{} more)", more)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
