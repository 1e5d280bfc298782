//! Column-order validation.
//!
//! The grid places a step under the column of its functional event, so the
//! header must name every event a fork uses, once, and each path must visit
//! them in declaration order. Violations are warnings unless strict ordering
//! is requested, in which case they fail the load.

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use roxmltree::Node;

use evtree_core::event_tree::EventTree;

use crate::{
    document::{children, is_element, tags},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

/// Check `event_tree` against the column-alignment rules.
///
/// `tree` is the located `define-event-tree` element, used to point
/// diagnostics at the offending elements.
pub(crate) fn validate_order(
    tree: Node<'_, '_>,
    source: &str,
    event_tree: &EventTree,
    strict: bool,
    collector: &mut DiagnosticCollector,
) {
    let mut emit = |diagnostic: Diagnostic| {
        warn!(message = diagnostic.message(); "Column order check failed");
        collector.emit(if strict {
            diagnostic.into_error()
        } else {
            diagnostic
        });
    };

    let columns = check_duplicate_events(tree, source, &mut emit);

    let mut undeclared = IndexSet::new();
    for sequence in event_tree.paths() {
        let mut previous: Option<(usize, &str)> = None;

        for step in sequence.steps() {
            let Some(&column) = columns.get(step.event()) else {
                if undeclared.insert(step.event()) {
                    emit(undeclared_event(tree, source, step.event()));
                }
                continue;
            };

            if let Some((previous_column, previous_event)) = previous {
                if column <= previous_column {
                    emit(out_of_order(
                        tree,
                        source,
                        sequence.sequence(),
                        step.event(),
                        previous_event,
                    ));
                    break;
                }
            }
            previous = Some((column, step.event()));
        }
    }

    debug!(columns = columns.len(), undeclared = undeclared.len(); "Column order checked");
}

/// Map each functional-event name to its first header column, reporting
/// every later declaration of the same name.
fn check_duplicate_events<'a>(
    tree: Node<'a, '_>,
    source: &str,
    emit: &mut impl FnMut(Diagnostic),
) -> IndexMap<&'a str, usize> {
    let mut columns: IndexMap<&str, usize> = IndexMap::new();
    let mut first_spans: IndexMap<&str, Span> = IndexMap::new();

    for (column, node) in children(tree, tags::FUNCTIONAL_EVENT).enumerate() {
        let name = node.attribute(tags::NAME_ATTR).unwrap_or_default();
        let span = Span::of_start_tag(node, source);

        if let Some(first) = first_spans.get(name) {
            emit(
                Diagnostic::warning(format!("functional event `{name}` is declared multiple times"))
                    .with_code(ErrorCode::E202)
                    .with_label(span, "duplicate declaration")
                    .with_secondary_label(*first, "first declared here")
                    .with_help("cells are placed under the first declaration"),
            );
            continue;
        }

        first_spans.insert(name, span);
        columns.insert(name, column);
    }

    columns
}

fn undeclared_event(tree: Node<'_, '_>, source: &str, event: &str) -> Diagnostic {
    let diagnostic = Diagnostic::warning(format!(
        "functional event `{event}` is used by a fork but never declared"
    ))
    .with_code(ErrorCode::E300)
    .with_help("add a `define-functional-event` for it to the event tree");

    match forks_using(tree, event).next() {
        Some(fork) => diagnostic.with_label(Span::of_start_tag(fork, source), "used here"),
        None => diagnostic,
    }
}

fn out_of_order(
    tree: Node<'_, '_>,
    source: &str,
    sequence: &str,
    event: &str,
    previous_event: &str,
) -> Diagnostic {
    let diagnostic = Diagnostic::warning(format!(
        "sequence `{sequence}` reaches `{event}` after `{previous_event}`, against declaration order"
    ))
    .with_code(ErrorCode::E301)
    .with_help("declare functional events in the order the forks enter them");

    let entered_late = forks_using(tree, event).find_map(|fork| {
        fork.ancestors()
            .skip(1)
            .find(|node| is_fork_of(*node, previous_event))
            .map(|earlier| (fork, earlier))
    });

    match entered_late {
        Some((fork, earlier)) => diagnostic
            .with_label(Span::of_start_tag(fork, source), "entered here")
            .with_secondary_label(Span::of_start_tag(earlier, source), "after this fork"),
        None => match forks_using(tree, event).next() {
            Some(fork) => diagnostic.with_label(Span::of_start_tag(fork, source), "entered here"),
            None => diagnostic,
        },
    }
}

/// Forks below `tree` that enter `event`, in document order.
fn forks_using<'a, 'input>(
    tree: Node<'a, 'input>,
    event: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    tree.descendants().filter(move |node| is_fork_of(*node, event))
}

fn is_fork_of(node: Node<'_, '_>, event: &str) -> bool {
    is_element(node, tags::FORK) && node.attribute(tags::FUNCTIONAL_EVENT_ATTR) == Some(event)
}

#[cfg(test)]
mod tests {
    use evtree_core::event_tree::{Sequence, StepRecord};

    use super::*;
    use crate::document::Document;

    const HEADER: &str = r#"
        <define-event-tree name="T">
            <define-functional-event name="FE1"/>
            <define-functional-event name="FE2"/>
            <define-functional-event name="FE3"/>
            <initial-state>
                <fork functional-event="FE9"><path state="s"/></fork>
            </initial-state>
        </define-event-tree>
    "#;

    fn check(source: &str, paths: Vec<Sequence>, strict: bool) -> DiagnosticCollector {
        let document = Document::parse(source).unwrap();
        let tree = document.event_trees().next().unwrap();
        let event_tree = EventTree::new(Vec::new(), paths);
        let mut collector = DiagnosticCollector::new();
        validate_order(tree, source, &event_tree, strict, &mut collector);
        collector
    }

    fn sequence(events: &[&str]) -> Sequence {
        Sequence::new(
            events
                .iter()
                .map(|event| StepRecord::new(*event, "Success"))
                .collect(),
            "S",
        )
    }

    #[test]
    fn test_ordered_paths_pass() {
        let paths = vec![sequence(&["FE1", "FE2", "FE3"]), sequence(&["FE1", "FE3"])];

        let warnings = check(HEADER, paths, true).finish().unwrap();

        assert!(warnings.is_empty());
    }

    #[test]
    fn test_out_of_order_warns() {
        let paths = vec![sequence(&["FE2", "FE1"]), sequence(&["FE1", "FE1"])];

        let warnings = check(HEADER, paths, false).finish().unwrap();

        assert_eq!(warnings.len(), 2);
        assert!(
            warnings
                .iter()
                .all(|warning| warning.code() == Some(ErrorCode::E301))
        );
    }

    #[test]
    fn test_out_of_order_fails_when_strict() {
        let paths = vec![sequence(&["FE3", "FE2"])];

        let err = check(HEADER, paths, true).finish().unwrap_err();

        assert_eq!(err.error_code(), Some(ErrorCode::E301));
    }

    #[test]
    fn test_out_of_order_labels_the_late_fork() {
        let source = r#"
            <define-event-tree name="T">
                <define-functional-event name="FE1"/>
                <define-functional-event name="FE2"/>
                <initial-state>
                    <fork functional-event="FE1">
                        <path state="s"><sequence name="EARLY"/></path>
                    </fork>
                    <fork functional-event="FE2">
                        <path state="s">
                            <fork functional-event="FE1"><path state="s"/></fork>
                        </path>
                    </fork>
                </initial-state>
            </define-event-tree>
        "#;
        let paths = vec![sequence(&["FE2", "FE1"])];

        let warnings = check(source, paths, false).finish().unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E301));
        let labels = warnings[0].labels();
        assert_eq!(labels.len(), 2);
        let late = source.rfind(r#"<fork functional-event="FE1">"#).unwrap();
        assert_eq!(labels[0].span().start(), late);
        assert_eq!(
            labels[1].span().start(),
            source.find(r#"<fork functional-event="FE2">"#).unwrap()
        );
    }

    #[test]
    fn test_undeclared_event_reported_once_with_label() {
        let paths = vec![sequence(&["FE9"]), sequence(&["FE9", "FE1"])];

        let warnings = check(HEADER, paths, false).finish().unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E300));
        assert_eq!(warnings[0].labels().len(), 1);
    }

    #[test]
    fn test_duplicate_declaration() {
        let source = r#"
            <define-event-tree name="T">
                <define-functional-event name="FE1"/>
                <define-functional-event name="FE1"/>
                <define-functional-event name="FE2"/>
            </define-event-tree>
        "#;
        let paths = vec![sequence(&["FE1", "FE2"])];

        let warnings = check(source, paths, false).finish().unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E202));
        assert_eq!(warnings[0].labels().len(), 2);
    }
}
