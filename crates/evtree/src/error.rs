//! Error types for Evtree operations.
//!
//! This module provides the main error type [`EvtreeError`] which wraps
//! the error conditions of a load, and [`ErrorKind`], the coarse
//! classification callers use to decide what to tell the user.

use std::io;

use thiserror::Error;

use evtree_parser::{ParseError, error::ErrorCode};

/// The main error type for Evtree operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the document text next to the diagnostics so
/// that reporters can show source snippets.
#[derive(Debug, Error)]
pub enum EvtreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

/// Coarse classification of an [`EvtreeError`].
///
/// Every kind is terminal for the current load: nothing is retried and no
/// partial result is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document could not be read.
    FetchFailure,
    /// The requested event tree does not exist in the document.
    TreeNotFound,
    /// The document is not usable: invalid XML, too deep, or rejected by
    /// strict ordering.
    MalformedDocument,
    /// The configuration is invalid.
    Config,
    /// The result could not be written out.
    Export,
}

impl From<crate::export::Error> for EvtreeError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl EvtreeError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::FetchFailure,
            Self::Parse { err, .. } => match err.error_code() {
                Some(ErrorCode::E100) => ErrorKind::TreeNotFound,
                _ => ErrorKind::MalformedDocument,
            },
            Self::Config(_) => ErrorKind::Config,
            Self::Export(_) => ErrorKind::Export,
        }
    }
}
