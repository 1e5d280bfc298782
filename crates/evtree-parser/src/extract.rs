//! Functional-event extractor: reads the ordered header of an event tree.

use log::{debug, trace};
use roxmltree::Node;

use evtree_core::event_tree::FunctionalEvent;

use crate::{
    document::{attribute_or_empty, children, tags},
    error::DiagnosticCollector,
};

/// Read every direct `define-functional-event` child of `tree`, in document order.
///
/// The label is the trimmed text of the `<label>` child, or empty when there
/// is none. Names are not checked for uniqueness here.
pub(crate) fn functional_events(
    tree: Node<'_, '_>,
    source: &str,
    collector: &mut DiagnosticCollector,
) -> Vec<FunctionalEvent> {
    let events: Vec<_> = children(tree, tags::FUNCTIONAL_EVENT)
        .map(|node| {
            let name = attribute_or_empty(node, tags::NAME_ATTR, source, collector);
            let label = children(node, tags::LABEL)
                .next()
                .and_then(|label| label.text())
                .map(str::trim)
                .unwrap_or_default();
            trace!(name, label; "Functional event");
            FunctionalEvent::new(name, label)
        })
        .collect();

    debug!(count = events.len(); "Functional events extracted");
    events
}
