//! Labeled source spans for diagnostic messages.
//!
//! A label attaches a message to a byte range of the XML document, pointing
//! the reader at the element that caused an error or warning.

use crate::span::Span;

/// A labeled span in the source document.
///
/// # Primary vs Secondary Labels
///
/// - **Primary labels** mark the element the diagnostic is about. There is
///   normally one per diagnostic.
/// - **Secondary labels** point at related elements, such as the definition
///   that won over an ignored duplicate.
///
/// # Example
///
/// ```text
/// warning[E101]: event tree `LOCA` is defined multiple times
///    |
///  3 |   <define-event-tree name="LOCA">
///    |   ------------------------------- first defined here
///  ...
/// 40 |   <define-event-tree name="LOCA">
///    |   ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ ignored definition
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
