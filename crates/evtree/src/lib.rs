//! Evtree - Turn OPSA-MEF event trees into flat, grid-ready sequence records.
//!
//! Locates a named event tree in an XML document, enumerates every sequence
//! reachable from its initial state, and projects the result onto a grid of
//! functional-event columns ready for display.

pub mod config;
pub mod export;

mod error;
mod layout;

pub use evtree_core::{event_tree, grid};
pub use evtree_parser::{Diagnostic, ParseOutput, Span};

pub use error::{ErrorKind, EvtreeError};

use log::{debug, info, trace, warn};

use evtree_core::{event_tree::EventTree, grid::GridLayout};

use config::{AppConfig, OutputFormat};
use export::{Exporter, json::JsonExporter, table::TableExporter};

/// Builder for loading, projecting and rendering event trees.
///
/// # Examples
///
/// ```rust
/// use evtree::{EventTreeBuilder, config::AppConfig};
///
/// let source = r#"
///     <opsa-mef>
///       <define-event-tree name="LOCA">
///         <define-functional-event name="FE1"/>
///         <initial-state>
///           <fork functional-event="FE1">
///             <path state="Success"><sequence name="OK"/></path>
///             <path state="Failure"><sequence name="CD"/></path>
///           </fork>
///         </initial-state>
///       </define-event-tree>
///     </opsa-mef>
/// "#;
///
/// let builder = EventTreeBuilder::new(AppConfig::default());
///
/// let tree = builder.load(source, "LOCA").expect("Failed to load");
/// assert_eq!(tree.paths().len(), 2);
///
/// let grid = builder.project(&tree);
/// assert_eq!(grid.rows()[1].sequence(), "CD");
///
/// let json = builder.render_json(&tree).expect("Failed to render");
/// assert!(json.contains("\"functionalEvents\""));
/// ```
#[derive(Default)]
pub struct EventTreeBuilder {
    config: AppConfig,
}

impl EventTreeBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including parser, layout and export settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load the event tree named `tree_name` from `source`.
    ///
    /// Warnings raised on the way are logged; use
    /// [`load_with_warnings`](Self::load_with_warnings) to receive them.
    ///
    /// # Arguments
    ///
    /// * `source` - The XML document text
    /// * `tree_name` - Name of the event tree, matched exactly
    ///
    /// # Errors
    ///
    /// Returns [`EvtreeError::Parse`] when the document is malformed, the tree
    /// does not exist, or the tree fails enumeration or strict ordering. See
    /// [`EvtreeError::kind`] for the classification.
    pub fn load(&self, source: &str, tree_name: &str) -> Result<EventTree, EvtreeError> {
        let (tree, warnings) = self.load_with_warnings(source, tree_name)?.into_parts();
        for warning in &warnings {
            warn!(tree_name; "{warning}");
        }
        Ok(tree)
    }

    /// Load the event tree named `tree_name` and keep the warnings raised on
    /// the way.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with_warnings(
        &self,
        source: &str,
        tree_name: &str,
    ) -> Result<ParseOutput, EvtreeError> {
        info!(tree_name; "Loading event tree");

        let output = evtree_parser::parse(source, tree_name, self.config.parser().parse_config())
            .map_err(|err| EvtreeError::new_parse_error(err, source))?;

        debug!(
            sequences = output.tree().paths().len(),
            warnings = output.warnings().len();
            "Event tree loaded"
        );
        trace!(tree:? = output.tree(); "Loaded event tree");

        Ok(output)
    }

    /// List the names of the event trees defined in `source`.
    ///
    /// # Errors
    ///
    /// Returns [`EvtreeError::Parse`] when the document is malformed.
    pub fn tree_names(&self, source: &str) -> Result<Vec<String>, EvtreeError> {
        evtree_parser::tree_names(source).map_err(|err| EvtreeError::new_parse_error(err, source))
    }

    /// Project `tree` onto a grid using the configured column mapping.
    pub fn project(&self, tree: &EventTree) -> GridLayout {
        layout::Projector::new(self.config.layout().column_mapping()).project(tree)
    }

    /// Render `tree` as the `{ functionalEvents, paths }` JSON record.
    ///
    /// # Errors
    ///
    /// Returns [`EvtreeError::Export`] if serialization fails.
    pub fn render_json(&self, tree: &EventTree) -> Result<String, EvtreeError> {
        let mut exporter = JsonExporter::new(Vec::new(), self.config.export().pretty());
        exporter.export(tree, &GridLayout::default())?;
        into_string(exporter.into_inner())
    }

    /// Render `tree` as a plain-text grid.
    ///
    /// # Errors
    ///
    /// Returns [`EvtreeError::Export`] if rendering fails.
    pub fn render_table(&self, tree: &EventTree) -> Result<String, EvtreeError> {
        let grid = self.project(tree);
        let mut exporter = TableExporter::new(Vec::new());
        exporter.export(tree, &grid)?;
        into_string(exporter.into_inner())
    }

    /// Render `tree` in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`EvtreeError::Export`] if rendering fails.
    pub fn render(&self, tree: &EventTree, format: OutputFormat) -> Result<String, EvtreeError> {
        info!(format:% = format; "Rendering event tree");
        match format {
            OutputFormat::Json => self.render_json(tree),
            OutputFormat::Table => self.render_table(tree),
        }
    }
}

fn into_string(bytes: Vec<u8>) -> Result<String, EvtreeError> {
    String::from_utf8(bytes)
        .map_err(|err| export::Error::Render(err.to_string()))
        .map_err(EvtreeError::from)
}
