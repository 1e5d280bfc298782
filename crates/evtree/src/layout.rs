//! Grid projection of enumerated sequences.
//!
//! Each sequence becomes one row. The header holds one column per declared
//! functional event; a row fills the columns its steps map to and leaves the
//! rest as spacers. How a step is mapped to a column is decided by
//! [`ColumnMapping`].

use indexmap::IndexMap;
use log::{debug, warn};

use evtree_core::{
    event_tree::{EventTree, Sequence},
    grid::{GridCell, GridColumn, GridLayout, GridRow},
};

use crate::config::ColumnMapping;

/// Projects an [`EventTree`] onto a [`GridLayout`].
pub(crate) struct Projector {
    mapping: ColumnMapping,
}

impl Projector {
    pub(crate) fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    pub(crate) fn project(&self, tree: &EventTree) -> GridLayout {
        let columns: Vec<GridColumn> = tree
            .functional_events()
            .iter()
            .enumerate()
            .map(|(index, event)| GridColumn::new(index, event.name(), event.label()))
            .collect();

        let rows: Vec<GridRow> = match self.mapping {
            ColumnMapping::ByName => {
                let lookup = column_lookup(tree);
                tree.paths()
                    .iter()
                    .enumerate()
                    .map(|(row_index, sequence)| {
                        by_name_row(row_index, sequence, &lookup, columns.len())
                    })
                    .collect()
            }
            ColumnMapping::ByPosition => tree
                .paths()
                .iter()
                .enumerate()
                .map(|(row_index, sequence)| by_position_row(row_index, sequence, columns.len()))
                .collect(),
        };

        debug!(
            mapping:? = self.mapping,
            columns = columns.len(),
            rows = rows.len();
            "Grid projected"
        );

        GridLayout::new(columns, rows)
    }
}

/// First header column of every functional-event name.
fn column_lookup(tree: &EventTree) -> IndexMap<&str, usize> {
    let mut lookup = IndexMap::new();
    for (index, event) in tree.functional_events().iter().enumerate() {
        lookup.entry(event.name()).or_insert(index);
    }
    lookup
}

fn by_name_row(
    row_index: usize,
    sequence: &Sequence,
    lookup: &IndexMap<&str, usize>,
    width: usize,
) -> GridRow {
    let mut filled = vec![false; width];
    let mut cells = Vec::with_capacity(sequence.depth());

    for step in sequence.steps() {
        let Some(&column) = lookup.get(step.event()) else {
            warn!(
                sequence = sequence.sequence(),
                event = step.event();
                "Dropping step with undeclared functional event from grid"
            );
            continue;
        };
        filled[column] = true;
        cells.push(GridCell::new(column, step.state()));
    }

    let spacers = filled
        .iter()
        .enumerate()
        .filter(|(_, filled)| !**filled)
        .map(|(column, _)| column)
        .collect();

    GridRow::new(row_index, sequence.sequence(), cells, spacers)
}

fn by_position_row(row_index: usize, sequence: &Sequence, width: usize) -> GridRow {
    let cells = sequence
        .steps()
        .iter()
        .enumerate()
        .map(|(column, step)| GridCell::new(column, step.state()))
        .collect();
    let spacers = (sequence.depth().min(width)..width).collect();

    GridRow::new(row_index, sequence.sequence(), cells, spacers)
}
