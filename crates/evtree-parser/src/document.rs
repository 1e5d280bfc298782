//! Document provider.
//!
//! XML parsing is delegated to [`roxmltree`]; this module only wraps its
//! read-only node tree with the handful of scoped queries the extraction
//! stages need: direct children by tag name and attributes with an
//! empty-string fallback.
//!
//! `roxmltree` builds its tree recursively, so element nesting is measured
//! first with a streaming [`quick_xml`] pass. Documents nested deeper than the
//! configured path depth allows are rejected with `E200` before the tree is
//! built.

use log::{debug, warn};
use quick_xml::{Reader, events::Event};
use roxmltree::{Node, ParsingOptions};

use crate::{
    enumerate::DEFAULT_MAX_DEPTH,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

/// Element levels allowed on top of two per path step: `opsa-mef`,
/// `define-event-tree`, `initial-state`, `sequence` and a few wrappers.
const ELEMENT_DEPTH_SLACK: usize = 8;

/// Element and attribute names of the OPSA-MEF event tree schema.
pub(crate) mod tags {
    pub const EVENT_TREE: &str = "define-event-tree";
    pub const FUNCTIONAL_EVENT: &str = "define-functional-event";
    pub const LABEL: &str = "label";
    pub const INITIAL_STATE: &str = "initial-state";
    pub const FORK: &str = "fork";
    pub const PATH: &str = "path";
    pub const SEQUENCE: &str = "sequence";

    pub const NAME_ATTR: &str = "name";
    pub const FUNCTIONAL_EVENT_ATTR: &str = "functional-event";
    pub const STATE_ATTR: &str = "state";
}

/// A parsed, immutable XML document together with its source text.
pub(crate) struct Document<'input> {
    doc: roxmltree::Document<'input>,
    source: &'input str,
}

impl<'input> Document<'input> {
    /// Parse `source` into a node tree, allowing paths of up to
    /// [`DEFAULT_MAX_DEPTH`] steps.
    ///
    /// # Errors
    ///
    /// See [`parse_with_depth`](Self::parse_with_depth).
    pub fn parse(source: &'input str) -> Result<Self, Diagnostic> {
        Self::parse_with_depth(source, DEFAULT_MAX_DEPTH)
    }

    /// Parse `source` into a node tree, allowing paths of up to `max_depth`
    /// steps.
    ///
    /// # Errors
    ///
    /// Returns an `E200` diagnostic on the first element nested deeper than
    /// `max_depth` allows, or an `E001` diagnostic positioned where the XML
    /// parser gave up.
    pub fn parse_with_depth(source: &'input str, max_depth: usize) -> Result<Self, Diagnostic> {
        check_nesting(source, max_depth)?;

        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };

        let doc = roxmltree::Document::parse_with_options(source, options).map_err(|err| {
            let span = Span::at_text_pos(source, err.pos());
            Diagnostic::error(format!("malformed XML document: {err}"))
                .with_code(ErrorCode::E001)
                .with_label(span, "the XML parser stopped here")
                .with_help("the input must be a well-formed OPSA-MEF XML document")
        })?;

        debug!(nodes = doc.descendants().count(); "Document parsed");
        Ok(Self { doc, source })
    }

    pub fn source(&self) -> &'input str {
        self.source
    }

    /// All event tree definitions in document order, at any depth.
    pub fn event_trees(&self) -> impl Iterator<Item = Node<'_, 'input>> {
        self.doc
            .descendants()
            .filter(|node| is_element(*node, tags::EVENT_TREE))
    }
}

/// Walk the element events of `source` and fail on the first element nested
/// more than `2 * max_depth + ELEMENT_DEPTH_SLACK` levels deep.
///
/// Syntax errors end the walk quietly; the tree parser reports them with its
/// own position.
fn check_nesting(source: &str, max_depth: usize) -> Result<(), Diagnostic> {
    let limit = max_depth
        .saturating_mul(2)
        .saturating_add(ELEMENT_DEPTH_SLACK);
    let mut reader = Reader::from_str(source);
    let mut depth = 0usize;

    loop {
        let start = offset(&reader);
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                depth += 1;
                if depth > limit {
                    let span = Span::new(start..offset(&reader));
                    return Err(Diagnostic::error(format!(
                        "element nesting exceeds {limit} levels, the most a path of {max_depth} steps needs"
                    ))
                    .with_code(ErrorCode::E200)
                    .with_label(span, "nested too deeply")
                    .with_help(
                        "raise `parser.max_depth` in the configuration if the tree is genuinely this deep",
                    ));
                }
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
    }

    debug!(limit; "Element nesting checked");
    Ok(())
}

fn offset(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

/// Returns `true` if `node` is an element with local name `tag`.
pub(crate) fn is_element(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().name() == tag
}

/// Direct element children of `node` named `tag`, in document order.
pub(crate) fn children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| is_element(*child, tag))
}

/// Reads an attribute the traversal depends on.
///
/// A missing attribute degrades to `""` and a warning is emitted so the
/// caller still gets a best-effort result.
pub(crate) fn attribute_or_empty<'a>(
    node: Node<'a, '_>,
    attr: &str,
    source: &str,
    collector: &mut DiagnosticCollector,
) -> &'a str {
    if let Some(value) = node.attribute(attr) {
        return value;
    }

    let tag = node.tag_name().name();
    warn!(tag, attr; "Missing attribute, using empty string");
    collector.emit(
        Diagnostic::warning(format!("`{tag}` element has no `{attr}` attribute"))
            .with_code(ErrorCode::E201)
            .with_label(Span::of_start_tag(node, source), "attribute missing")
            .with_help(format!("an empty `{attr}` is used in its place")),
    );
    ""
}
