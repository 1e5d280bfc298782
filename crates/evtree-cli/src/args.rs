//! Command-line argument definitions for the Evtree CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input document and event tree, the
//! output destination and format, configuration file selection, and logging
//! verbosity.

use clap::{Parser, ValueEnum};

use evtree::config::OutputFormat;

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Command-line arguments for the Evtree event tree tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the OPSA-MEF XML document, or `-` to read standard input
    #[arg(help = "Path to the input file, or - for stdin")]
    pub input: String,

    /// Name of the event tree to enumerate, matched exactly
    #[arg(short, long, required_unless_present = "list")]
    pub tree: Option<String>,

    /// Path to the output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format, overriding the configuration file
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// List the event trees defined in the document and exit
    #[arg(long)]
    pub list: bool,
}

/// Output formats selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Table,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Table => OutputFormat::Table,
        }
    }
}
