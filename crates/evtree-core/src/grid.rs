//! Grid coordinates for rendering an enumerated event tree.
//!
//! A [`GridLayout`] is the output of the layout projector: one [`GridColumn`]
//! per functional event and one [`GridRow`] per sequence. Renderers draw a
//! state cell for every [`GridCell`] and a blank spacer for every column the
//! row leaves unfilled.

use serde::{Serialize, Serializer, ser::SerializeStruct};

/// A header column, one per declared functional event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridColumn {
    column_index: usize,
    name: String,
    label: String,
}

impl GridColumn {
    pub fn new(column_index: usize, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            column_index,
            name: name.into(),
            label: label.into(),
        }
    }

    pub fn column_index(&self) -> usize {
        self.column_index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A filled cell carrying the state taken at one functional event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    column_index: usize,
    state: String,
}

impl GridCell {
    pub fn new(column_index: usize, state: impl Into<String>) -> Self {
        Self {
            column_index,
            state: state.into(),
        }
    }

    pub fn column_index(&self) -> usize {
        self.column_index
    }

    pub fn state(&self) -> &str {
        &self.state
    }
}

/// A row of the grid, one per enumerated sequence.
///
/// Serializes with a derived `spacerCount` next to `spacerColumns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    row_index: usize,
    sequence: String,
    cells: Vec<GridCell>,
    spacer_columns: Vec<usize>,
}

impl GridRow {
    /// Creates a row.
    ///
    /// # Arguments
    ///
    /// * `row_index` - Position of the sequence in the enumerated list.
    /// * `sequence` - Name of the terminal sequence shown at the end of the row.
    /// * `cells` - Filled cells, in step order.
    /// * `spacer_columns` - Header columns the row leaves blank, ascending.
    pub fn new(
        row_index: usize,
        sequence: impl Into<String>,
        cells: Vec<GridCell>,
        spacer_columns: Vec<usize>,
    ) -> Self {
        Self {
            row_index,
            sequence: sequence.into(),
            cells,
            spacer_columns,
        }
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn spacer_columns(&self) -> &[usize] {
        &self.spacer_columns
    }

    /// Number of blank spacer cells the renderer must draw for this row.
    pub fn spacer_count(&self) -> usize {
        self.spacer_columns.len()
    }

    /// Returns the cell placed in `column_index`, if any.
    pub fn cell_at(&self, column_index: usize) -> Option<&GridCell> {
        self.cells
            .iter()
            .find(|cell| cell.column_index == column_index)
    }
}

impl Serialize for GridRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("GridRow", 5)?;
        row.serialize_field("rowIndex", &self.row_index)?;
        row.serialize_field("sequence", &self.sequence)?;
        row.serialize_field("cells", &self.cells)?;
        row.serialize_field("spacerColumns", &self.spacer_columns)?;
        row.serialize_field("spacerCount", &self.spacer_count())?;
        row.end()
    }
}

/// The complete grid: header columns plus one row per sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    columns: Vec<GridColumn>,
    rows: Vec<GridRow>,
}

impl GridLayout {
    pub fn new(columns: Vec<GridColumn>, rows: Vec<GridRow>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[GridColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Number of header columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_accessors() {
        let row = GridRow::new(
            2,
            "SEQ-3",
            vec![GridCell::new(0, "Failure")],
            vec![1, 2],
        );

        assert_eq!(row.row_index(), 2);
        assert_eq!(row.sequence(), "SEQ-3");
        assert_eq!(row.spacer_count(), 2);
        assert_eq!(row.cell_at(0).map(GridCell::state), Some("Failure"));
        assert!(row.cell_at(1).is_none());
    }

    #[test]
    fn test_serializes_row_with_camel_case_fields() {
        let row = GridRow::new(0, "S", vec![GridCell::new(1, "Success")], vec![0]);
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["rowIndex"], 0);
        assert_eq!(json["cells"][0]["columnIndex"], 1);
        assert_eq!(json["spacerColumns"][0], 0);
        assert_eq!(json["spacerCount"], 1);
    }

    #[test]
    fn test_serialized_spacer_count_matches_columns() {
        let row = GridRow::new(1, "S", Vec::new(), vec![0, 2, 3]);
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["spacerColumns"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["spacerCount"], 3);
    }
}
