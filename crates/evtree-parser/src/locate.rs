//! Tree locator: finds the event tree definition matching a requested name.

use indexmap::IndexSet;
use log::{debug, warn};
use roxmltree::Node;

use crate::{
    document::{Document, tags},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

/// Find the `define-event-tree` whose `name` equals `tree_name` exactly.
///
/// The first match in document order wins. Every later match is reported as
/// an `E101` warning pointing back at the definition that was used.
///
/// # Errors
///
/// Returns an `E100` diagnostic when no definition matches. Its help text
/// lists the event trees the document does define.
pub(crate) fn locate<'a, 'input>(
    document: &'a Document<'input>,
    tree_name: &str,
    collector: &mut DiagnosticCollector,
) -> Result<Node<'a, 'input>, Diagnostic> {
    let source = document.source();
    let mut matches = document
        .event_trees()
        .filter(|node| node.attribute(tags::NAME_ATTR) == Some(tree_name));

    let Some(found) = matches.next() else {
        return Err(not_found(document, tree_name));
    };
    let found_span = Span::of_start_tag(found, source);

    for duplicate in matches {
        warn!(tree_name; "Event tree defined more than once, using the first definition");
        collector.emit(
            Diagnostic::warning(format!(
                "event tree `{tree_name}` is defined multiple times"
            ))
            .with_code(ErrorCode::E101)
            .with_label(Span::of_start_tag(duplicate, source), "ignored definition")
            .with_secondary_label(found_span, "first defined here")
            .with_help("rename or remove the duplicate definition"),
        );
    }

    debug!(tree_name, offset = found_span.start(); "Event tree located");
    Ok(found)
}

/// Names of every event tree definition, in document order.
///
/// Definitions without a `name` attribute are skipped.
pub(crate) fn tree_names(document: &Document<'_>) -> Vec<String> {
    document
        .event_trees()
        .filter_map(|node| node.attribute(tags::NAME_ATTR))
        .map(str::to_string)
        .collect()
}

fn not_found(document: &Document<'_>, tree_name: &str) -> Diagnostic {
    let available: IndexSet<String> = tree_names(document).into_iter().collect();
    let help = if available.is_empty() {
        "the document does not define any event trees".to_string()
    } else {
        let names = available
            .iter()
            .map(|name| format!("`{name}`"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("the document defines: {names}")
    };

    Diagnostic::error(format!("event tree `{tree_name}` not found"))
        .with_code(ErrorCode::E100)
        .with_help(help)
}
