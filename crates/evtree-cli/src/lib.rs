//! CLI logic for the Evtree event tree tool.
//!
//! This module contains the core CLI logic: reading the document, loading the
//! requested event tree, and writing the rendered result.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format, STDIN_PATH};

use std::{
    fs,
    io::{self, Read, Write},
};

use log::{debug, info};

use evtree::{Diagnostic, EventTreeBuilder, EvtreeError};

use error_adapter::{Reportable, warning_reportables};

/// What a successful run leaves for the caller to report.
#[derive(Debug, Default)]
pub struct RunOutcome {
    source: String,
    warnings: Vec<Diagnostic>,
}

impl RunOutcome {
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// The warnings wrapped for miette, pointing into the document text.
    pub fn reportables(&self) -> Vec<Reportable<'_>> {
        warning_reportables(&self.warnings, &self.source)
    }
}

/// Run the Evtree CLI application
///
/// Reads the input document, then either lists its event trees or loads the
/// requested tree and writes it in the selected format.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `EvtreeError` for:
/// - Configuration loading errors
/// - Input and output I/O errors
/// - Malformed documents and missing event trees
/// - Rendering errors
pub fn run(args: &Args) -> Result<RunOutcome, EvtreeError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing document"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let format = args
        .format
        .map(Into::into)
        .unwrap_or_else(|| app_config.export().format());

    let source = read_input(&args.input)?;
    let builder = EventTreeBuilder::new(app_config);

    if args.list {
        let mut listing = builder.tree_names(&source)?.join("\n");
        listing.push('\n');
        write_output(args.output.as_deref(), &listing)?;
        return Ok(RunOutcome {
            source,
            warnings: Vec::new(),
        });
    }

    let tree_name = args.tree.as_deref().ok_or_else(|| {
        EvtreeError::Config("an event tree name is required unless --list is given".to_string())
    })?;

    let (tree, warnings) = builder.load_with_warnings(&source, tree_name)?.into_parts();
    let rendered = builder.render(&tree, format)?;
    write_output(args.output.as_deref(), &rendered)?;

    info!(
        sequences = tree.paths().len(),
        warnings = warnings.len();
        "Event tree exported successfully"
    );

    Ok(RunOutcome { source, warnings })
}

fn read_input(input: &str) -> Result<String, EvtreeError> {
    if input == STDIN_PATH {
        debug!("Reading document from standard input");
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }

    Ok(fs::read_to_string(input)?)
}

fn write_output(output: Option<&str>, content: &str) -> Result<(), EvtreeError> {
    match output {
        Some(path) => fs::write(path, content)?,
        None => io::stdout().lock().write_all(content.as_bytes())?,
    }
    Ok(())
}
