//! Configuration types for event tree loading, layout and export.
//!
//! This module provides configuration structures that control how event
//! trees are enumerated, projected onto a grid and written out. All types
//! implement [`serde::Deserialize`] so they can be loaded from external
//! sources; every field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`ParserConfig`] - Depth limit and ordering strictness for enumeration.
//! - [`LayoutConfig`] - How steps are mapped to grid columns ([`ColumnMapping`]).
//! - [`ExportConfig`] - Default [`OutputFormat`] and JSON formatting.
//!
//! # Example
//!
//! ```
//! # use evtree::config::{AppConfig, ColumnMapping};
//! let config = AppConfig::default();
//! assert_eq!(config.parser().max_depth(), 256);
//! assert_eq!(config.layout().column_mapping(), ColumnMapping::ByName);
//! assert!(config.validate().is_ok());
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use evtree_parser::{DEFAULT_MAX_DEPTH, EnumerateConfig, ParseConfig};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Enumeration settings.
    #[serde(default)]
    parser: ParserConfig,

    /// Grid projection settings.
    #[serde(default)]
    layout: LayoutConfig,

    /// Output settings.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parser: ParserConfig, layout: LayoutConfig, export: ExportConfig) -> Self {
        Self {
            parser,
            layout,
            export,
        }
    }

    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Replace the export section (builder style).
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.parser.max_depth == 0 {
            return Err("parser.max_depth must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Settings for locating and enumerating an event tree.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Maximum number of steps in one path.
    #[serde(default = "default_max_depth")]
    max_depth: usize,

    /// Reject trees whose paths disagree with the functional-event declaration order.
    #[serde(default)]
    strict_order: bool,
}

impl ParserConfig {
    pub fn new(max_depth: usize, strict_order: bool) -> Self {
        Self {
            max_depth,
            strict_order,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn strict_order(&self) -> bool {
        self.strict_order
    }

    /// Settings in the form the parser crate takes them.
    pub(crate) fn parse_config(&self) -> ParseConfig {
        ParseConfig::new(EnumerateConfig::new(self.max_depth), self.strict_order)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new(default_max_depth(), false)
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// How the layout projector assigns a column to each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnMapping {
    /// Column of the functional event the step names.
    #[default]
    ByName,
    /// Column equal to the step's position in its path.
    ByPosition,
}

/// Grid projection settings.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    column_mapping: ColumnMapping,
}

impl LayoutConfig {
    pub fn new(column_mapping: ColumnMapping) -> Self {
        Self { column_mapping }
    }

    pub fn column_mapping(&self) -> ColumnMapping {
        self.column_mapping
    }
}

/// Output format for rendered event trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The `{ functionalEvents, paths }` record.
    #[default]
    Json,
    /// Plain-text grid.
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => Err(format!("unknown output format `{other}`, expected `json` or `table`")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    format: OutputFormat,

    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

impl ExportConfig {
    pub fn new(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(OutputFormat::default(), default_pretty())
    }
}

fn default_pretty() -> bool {
    true
}
