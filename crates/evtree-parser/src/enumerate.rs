//! Path enumerator: turns the fork/path structure under an initial state into
//! a flat list of sequence records.
//!
//! # Traversal
//!
//! The walk is depth-first in document order. Every `path` element extends the
//! accumulated steps with `{fork's functional event, path's state}`. A path
//! that directly holds a `sequence` element emits a record right away; the
//! walk then continues into the forks nested in that same path, so a path
//! carrying both a sequence and further forks emits one shallow record
//! followed by the deeper ones.
//!
//! Instead of recursing, pending paths are kept on an explicit stack. Sibling
//! paths are pushed in reverse so they pop in document order, and a path's
//! children are pushed on top of its remaining siblings, which reproduces the
//! recursive pre-order exactly. Path length is capped by
//! [`EnumerateConfig::max_depth`].

use log::{debug, trace};
use roxmltree::Node;

use evtree_core::event_tree::{Sequence, StepRecord};

use crate::{
    document::{attribute_or_empty, children, tags},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

/// Default cap on the number of steps in one path.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while enumerating paths.
#[derive(Debug, Clone, Copy)]
pub struct EnumerateConfig {
    max_depth: usize,
}

impl EnumerateConfig {
    /// Create a config allowing paths of at most `max_depth` steps.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for EnumerateConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

/// A `path` element waiting to be visited, with the steps that reach it.
struct PendingPath<'a, 'input> {
    node: Node<'a, 'input>,
    steps: Vec<StepRecord>,
}

/// Enumerate every sequence reachable from `initial_state`.
///
/// Missing `functional-event`, `state` and sequence `name` attributes are
/// read as empty strings and reported as warnings through `collector`.
///
/// # Errors
///
/// Returns an `E200` diagnostic labelled on the offending `path` when a path
/// would hold more than [`EnumerateConfig::max_depth`] steps.
pub(crate) fn enumerate(
    initial_state: Node<'_, '_>,
    source: &str,
    config: EnumerateConfig,
    collector: &mut DiagnosticCollector,
) -> Result<Vec<Sequence>, Diagnostic> {
    let mut sequences = Vec::new();
    let mut stack = Vec::new();

    push_paths(&mut stack, initial_state, &[], source, config, collector)?;

    while let Some(PendingPath { node, steps }) = stack.pop() {
        trace!(depth = steps.len(), offset = node.range().start; "Visiting path");

        if let Some(marker) = children(node, tags::SEQUENCE).next() {
            let name = attribute_or_empty(marker, tags::NAME_ATTR, source, collector);
            trace!(sequence = name, depth = steps.len(); "Sequence emitted");
            sequences.push(Sequence::new(steps.clone(), name));
        }

        push_paths(&mut stack, node, &steps, source, config, collector)?;
    }

    debug!(count = sequences.len(); "Sequences enumerated");
    Ok(sequences)
}

/// Push every path of every fork directly under `container`, so that they pop
/// in document order.
fn push_paths<'a, 'input>(
    stack: &mut Vec<PendingPath<'a, 'input>>,
    container: Node<'a, 'input>,
    prefix: &[StepRecord],
    source: &str,
    config: EnumerateConfig,
    collector: &mut DiagnosticCollector,
) -> Result<(), Diagnostic> {
    let mut pending = Vec::new();

    for fork in children(container, tags::FORK) {
        let event = attribute_or_empty(fork, tags::FUNCTIONAL_EVENT_ATTR, source, collector);

        for path in children(fork, tags::PATH) {
            if prefix.len() >= config.max_depth {
                return Err(depth_exceeded(path, source, config.max_depth));
            }

            let state = attribute_or_empty(path, tags::STATE_ATTR, source, collector);
            let mut steps = Vec::with_capacity(prefix.len() + 1);
            steps.extend_from_slice(prefix);
            steps.push(StepRecord::new(event, state));
            pending.push(PendingPath { node: path, steps });
        }
    }

    stack.extend(pending.into_iter().rev());
    Ok(())
}

fn depth_exceeded(path: Node<'_, '_>, source: &str, max_depth: usize) -> Diagnostic {
    Diagnostic::error(format!(
        "path nesting exceeds the maximum depth of {max_depth}"
    ))
    .with_code(ErrorCode::E200)
    .with_label(Span::of_start_tag(path, source), "this path is too deep")
    .with_help("raise `parser.max_depth` in the configuration if the tree is genuinely this deep")
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::document::Document;

    /// A generated `path` element: its state, whether it holds a sequence
    /// marker, and the paths of each nested fork.
    #[derive(Debug, Clone)]
    struct GenPath {
        success: bool,
        sequence: bool,
        forks: Vec<Vec<GenPath>>,
    }

    // ===================
    // Strategies
    // ===================

    fn path_strategy() -> impl Strategy<Value = GenPath> {
        let leaf = (any::<bool>(), any::<bool>()).prop_map(|(success, sequence)| GenPath {
            success,
            sequence,
            forks: Vec::new(),
        });
        leaf.prop_recursive(4, 64, 3, |inner| {
            (
                any::<bool>(),
                any::<bool>(),
                prop::collection::vec(prop::collection::vec(inner, 1..3), 0..3),
            )
                .prop_map(|(success, sequence, forks)| GenPath {
                    success,
                    sequence,
                    forks,
                })
        })
    }

    fn initial_state_strategy() -> impl Strategy<Value = Vec<Vec<GenPath>>> {
        prop::collection::vec(prop::collection::vec(path_strategy(), 1..3), 0..3)
    }

    // ===================
    // Helpers
    // ===================

    fn state(path: &GenPath) -> &'static str {
        if path.success { "Success" } else { "Failure" }
    }

    fn render_forks(forks: &[Vec<GenPath>], depth: usize, counter: &mut usize, out: &mut String) {
        for fork in forks {
            out.push_str(&format!(r#"<fork functional-event="FE{depth}">"#));
            for path in fork {
                out.push_str(&format!(r#"<path state="{}">"#, state(path)));
                if path.sequence {
                    out.push_str(&format!(r#"<sequence name="S{counter}"/>"#));
                    *counter += 1;
                }
                render_forks(&path.forks, depth + 1, counter, out);
                out.push_str("</path>");
            }
            out.push_str("</fork>");
        }
    }

    fn render(initial: &[Vec<GenPath>]) -> String {
        let mut out = String::from(r#"<define-event-tree name="T"><initial-state>"#);
        render_forks(initial, 1, &mut 0, &mut out);
        out.push_str("</initial-state></define-event-tree>");
        out
    }

    /// Straightforward recursive definition of the traversal.
    fn reference(
        forks: &[Vec<GenPath>],
        prefix: &[StepRecord],
        depth: usize,
        counter: &mut usize,
        out: &mut Vec<Sequence>,
    ) {
        for fork in forks {
            for path in fork {
                let mut steps = prefix.to_vec();
                steps.push(StepRecord::new(format!("FE{depth}"), state(path)));
                if path.sequence {
                    out.push(Sequence::new(steps.clone(), format!("S{counter}")));
                    *counter += 1;
                }
                reference(&path.forks, &steps, depth + 1, counter, out);
            }
        }
    }

    fn enumerate_source(source: &str) -> Vec<Sequence> {
        let document = Document::parse(source).expect("generated XML is well-formed");
        let tree = document.event_trees().next().expect("tree exists");
        let initial_state = children(tree, tags::INITIAL_STATE)
            .next()
            .expect("initial state exists");
        let mut collector = DiagnosticCollector::new();
        enumerate(
            initial_state,
            source,
            EnumerateConfig::default(),
            &mut collector,
        )
        .expect("generated trees are shallow")
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The stack-based walk emits exactly what the recursive definition emits.
    fn check_matches_recursive_definition(initial: &[Vec<GenPath>]) -> Result<(), TestCaseError> {
        let source = render(initial);
        let mut expected = Vec::new();
        reference(initial, &[], 1, &mut 0, &mut expected);

        prop_assert_eq!(enumerate_source(&source), expected);
        Ok(())
    }

    /// One record per sequence marker, every record as deep as its marker.
    fn check_one_record_per_marker(initial: &[Vec<GenPath>]) -> Result<(), TestCaseError> {
        let source = render(initial);
        let sequences = enumerate_source(&source);

        prop_assert_eq!(sequences.len(), source.matches("<sequence ").count());
        for sequence in &sequences {
            for (idx, step) in sequence.steps().iter().enumerate() {
                prop_assert_eq!(step.event(), format!("FE{}", idx + 1));
            }
        }
        Ok(())
    }

    /// Enumerating the same document twice yields identical output.
    fn check_deterministic(initial: &[Vec<GenPath>]) -> Result<(), TestCaseError> {
        let source = render(initial);

        prop_assert_eq!(enumerate_source(&source), enumerate_source(&source));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn matches_recursive_definition(initial in initial_state_strategy()) {
            check_matches_recursive_definition(&initial)?;
        }

        #[test]
        fn one_record_per_marker(initial in initial_state_strategy()) {
            check_one_record_per_marker(&initial)?;
        }

        #[test]
        fn deterministic(initial in initial_state_strategy()) {
            check_deterministic(&initial)?;
        }
    }
}
