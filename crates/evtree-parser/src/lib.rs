//! # Evtree Parser
//!
//! Reads an OPSA-MEF XML document and turns one of its event trees into a
//! flat [`EventTree`]: the ordered functional-event header and every sequence
//! reachable from the tree's initial state.
//!
//! ## Usage
//!
//! ```
//! # use evtree_parser::{parse, ParseConfig, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <opsa-mef>
//!           <define-event-tree name="LOCA">
//!             <define-functional-event name="FE1"><label>Injection</label></define-functional-event>
//!             <initial-state>
//!               <fork functional-event="FE1">
//!                 <path state="Success"><sequence name="OK"/></path>
//!                 <path state="Failure"><sequence name="CD"/></path>
//!               </fork>
//!             </initial-state>
//!           </define-event-tree>
//!         </opsa-mef>
//!     "#;
//!
//!     let output = parse(source, "LOCA", ParseConfig::default())?;
//!     assert_eq!(output.tree().paths().len(), 2);
//!     Ok(())
//! }
//! ```

mod document;
mod enumerate;
pub mod error;
mod extract;
mod locate;
mod span;
mod validate;

pub use enumerate::{DEFAULT_MAX_DEPTH, EnumerateConfig};
pub use error::{Diagnostic, ParseError};
pub use span::Span;

use log::{debug, info, warn};

use evtree_core::event_tree::EventTree;

use document::{Document, children, tags};
use error::{DiagnosticCollector, ErrorCode};

/// Configuration for the extraction pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseConfig {
    /// Limits for the path enumerator
    pub enumerate: EnumerateConfig,
    /// Fail the load when paths disagree with the functional-event declaration order
    pub strict_order: bool,
}

impl ParseConfig {
    /// Create a new ParseConfig.
    pub fn new(enumerate: EnumerateConfig, strict_order: bool) -> Self {
        Self {
            enumerate,
            strict_order,
        }
    }
}

/// A successfully enumerated event tree and the warnings raised on the way.
#[derive(Debug)]
pub struct ParseOutput {
    tree: EventTree,
    warnings: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn tree(&self) -> &EventTree {
        &self.tree
    }

    /// Warnings about degraded input, in the order they were raised.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_parts(self) -> (EventTree, Vec<Diagnostic>) {
        (self.tree, self.warnings)
    }
}

/// Parse `source` and enumerate the event tree named `tree_name`.
///
/// Pipeline:
///
/// 1. **Read** - Hand the text to the XML document provider
/// 2. **Locate** - Find the `define-event-tree` whose name matches exactly
/// 3. **Extract** - Read the functional-event header
/// 4. **Enumerate** - Walk forks and paths under the initial state
/// 5. **Validate** - Check steps against the header's column order
///
/// # Arguments
///
/// * `source` - The XML document text
/// * `tree_name` - Name of the event tree to enumerate, matched exactly
/// * `config` - Depth limit and ordering strictness
///
/// # Errors
///
/// Returns a [`ParseError`] when the document is malformed (`E001`), the tree
/// does not exist (`E100`), a path is nested too deeply (`E200`), or, with
/// [`ParseConfig::strict_order`], when the ordering checks fail (`E2xx`/`E3xx`).
pub fn parse(source: &str, tree_name: &str, config: ParseConfig) -> Result<ParseOutput, ParseError> {
    let document = Document::parse_with_depth(source, config.enumerate.max_depth())?;
    let mut collector = DiagnosticCollector::new();

    info!(tree_name; "Locating event tree");
    let tree_node = match locate::locate(&document, tree_name, &mut collector) {
        Ok(node) => node,
        Err(diagnostic) => {
            collector.emit(diagnostic);
            return Err(finish_with_errors(collector));
        }
    };

    let functional_events = extract::functional_events(tree_node, source, &mut collector);

    let paths = match children(tree_node, tags::INITIAL_STATE).next() {
        Some(initial_state) => {
            info!(tree_name; "Enumerating sequences");
            match enumerate::enumerate(initial_state, source, config.enumerate, &mut collector) {
                Ok(paths) => paths,
                Err(diagnostic) => {
                    collector.emit(diagnostic);
                    return Err(finish_with_errors(collector));
                }
            }
        }
        None => {
            warn!(tree_name; "Event tree has no initial state");
            collector.emit(
                Diagnostic::warning(format!("event tree `{tree_name}` has no initial state"))
                    .with_code(ErrorCode::E203)
                    .with_label(Span::of_start_tag(tree_node, source), "defined here")
                    .with_help("add an `initial-state` element holding the top-level forks"),
            );
            Vec::new()
        }
    };

    let tree = EventTree::new(functional_events, paths);
    validate::validate_order(tree_node, source, &tree, config.strict_order, &mut collector);

    let warnings = collector.finish()?;
    debug!(
        functional_events = tree.functional_events().len(),
        sequences = tree.paths().len(),
        warnings = warnings.len();
        "Event tree enumerated"
    );

    Ok(ParseOutput { tree, warnings })
}

/// List the names of all event trees defined in `source`, in document order.
///
/// # Errors
///
/// Returns an `E001` [`ParseError`] when the document is malformed, or `E200`
/// when it is nested deeper than [`DEFAULT_MAX_DEPTH`] allows.
pub fn tree_names(source: &str) -> Result<Vec<String>, ParseError> {
    let document = Document::parse(source)?;
    Ok(locate::tree_names(&document))
}

fn finish_with_errors(collector: DiagnosticCollector) -> ParseError {
    debug_assert!(collector.has_errors());
    match collector.finish() {
        Err(err) => err,
        Ok(diagnostics) => ParseError::new(diagnostics),
    }
}
