//! Error codes for the Evtree diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document errors
//! - `E1xx` - Event tree lookup
//! - `E2xx` - Tree structure
//! - `E3xx` - Column ordering

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E0xx)
    // =========================================================================
    /// Malformed XML.
    ///
    /// The document provider rejected the input.
    E001,

    // =========================================================================
    // Lookup Errors (E1xx)
    // =========================================================================
    /// Event tree not found.
    ///
    /// No `define-event-tree` element carries the requested name.
    E100,

    /// Duplicate event tree.
    ///
    /// More than one `define-event-tree` carries the requested name. The first
    /// one in document order is used.
    E101,

    // =========================================================================
    // Structure Errors (E2xx)
    // =========================================================================
    /// Maximum depth exceeded.
    ///
    /// A path is nested deeper than the configured maximum.
    E200,

    /// Missing attribute.
    ///
    /// An element lacks an attribute the traversal reads. The value is
    /// treated as an empty string.
    E201,

    /// Duplicate functional event.
    ///
    /// Two `define-functional-event` elements share a name.
    E202,

    /// Missing initial state.
    ///
    /// The event tree has no `initial-state` element, so it has no sequences.
    E203,

    // =========================================================================
    // Ordering Errors (E3xx)
    // =========================================================================
    /// Undeclared functional event.
    ///
    /// A fork refers to a functional event the tree does not declare.
    E300,

    /// Out-of-order step.
    ///
    /// A path enters forks in an order that disagrees with the declaration
    /// order of their functional events.
    E301,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed XML",
            ErrorCode::E100 => "event tree not found",
            ErrorCode::E101 => "duplicate event tree",
            ErrorCode::E200 => "maximum depth exceeded",
            ErrorCode::E201 => "missing attribute",
            ErrorCode::E202 => "duplicate functional event",
            ErrorCode::E203 => "missing initial state",
            ErrorCode::E300 => "undeclared functional event",
            ErrorCode::E301 => "out-of-order step",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
