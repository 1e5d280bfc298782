//! Export functionality for enumerated event trees.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing an enumerated tree and its grid projection to an output format. It
//! is the final stage in the processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! XML Document
//!     ↓ locate / extract / enumerate
//! EventTree
//!     ↓ project
//! GridLayout
//!     ↓ export (this module)
//! Output Text
//! ```
//!
//! # Available Backends
//!
//! - [`json`] - The `{ functionalEvents, paths }` record via [`json::JsonExporter`]
//! - [`table`] - A plain-text grid via [`table::TableExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`EvtreeError::Export`] at the crate
//! boundary.
//!
//! [`EvtreeError::Export`]: crate::EvtreeError::Export

pub mod json;
pub mod table;

use evtree_core::{event_tree::EventTree, grid::GridLayout};

/// Abstraction for export backends.
///
/// Backends receive both the enumerated tree and its grid so that each can
/// pick the view it renders.
pub trait Exporter {
    /// Writes `tree` (projected as `grid`) to the backend's output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the data cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export(&mut self, tree: &EventTree, grid: &GridLayout) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
