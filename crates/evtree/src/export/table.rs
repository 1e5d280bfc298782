//! Plain-text grid backend.
//!
//! Renders one header row of functional-event names followed by one row per
//! sequence. Filled cells show the branch state, spacer cells are blank and
//! the sequence name closes each row:
//!
//! ```text
//! # | FE1     | FE2     | Sequence
//! --+---------+---------+---------
//! 0 | Success | Success | SEQ-1
//! 2 | Failure |         | SEQ-3
//! ```

use std::io::Write;

use log::debug;

use evtree_core::{event_tree::EventTree, grid::GridLayout};

use super::{Error, Exporter};

const INDEX_HEADER: &str = "#";
const SEQUENCE_HEADER: &str = "Sequence";

/// Writes the [`GridLayout`] as an aligned text table.
pub struct TableExporter<W: Write> {
    writer: W,
}

impl<W: Write> TableExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for TableExporter<W> {
    fn export(&mut self, _tree: &EventTree, grid: &GridLayout) -> Result<(), Error> {
        let table = build_table(grid);

        let widths: Vec<usize> = (0..table[0].len())
            .map(|column| {
                table
                    .iter()
                    .map(|row| row[column].chars().count())
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let (header, body) = table.split_at(1);
        write_row(&mut self.writer, &header[0], &widths)?;
        let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        writeln!(self.writer, "{}", separator.join("-+-"))?;
        for row in body {
            write_row(&mut self.writer, row, &widths)?;
        }

        debug!(columns = widths.len(), rows = body.len(); "Table written");
        Ok(())
    }
}

/// Text of every cell, header row first.
///
/// Cells placed beyond the header (by-position mapping of long paths) get
/// extra unnamed columns so nothing is lost.
fn build_table(grid: &GridLayout) -> Vec<Vec<String>> {
    let width = grid
        .rows()
        .iter()
        .flat_map(|row| row.cells())
        .map(|cell| cell.column_index() + 1)
        .max()
        .unwrap_or_default()
        .max(grid.width());

    let mut header = Vec::with_capacity(width + 2);
    header.push(INDEX_HEADER.to_string());
    header.extend((0..width).map(|index| {
        grid.columns()
            .get(index)
            .map(|column| column.name().to_string())
            .unwrap_or_default()
    }));
    header.push(SEQUENCE_HEADER.to_string());

    let mut table = vec![header];
    for row in grid.rows() {
        let mut line = Vec::with_capacity(width + 2);
        line.push(row.row_index().to_string());
        line.extend((0..width).map(|index| {
            row.cell_at(index)
                .map(|cell| cell.state().to_string())
                .unwrap_or_default()
        }));
        line.push(row.sequence().to_string());
        table.push(line);
    }
    table
}

fn write_row(writer: &mut impl Write, row: &[String], widths: &[usize]) -> Result<(), Error> {
    let padded: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(text, width)| format!("{text:<width$}"))
        .collect();
    writeln!(writer, "{}", padded.join(" | ").trim_end())?;
    Ok(())
}
