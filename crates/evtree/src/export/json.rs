//! JSON backend.
//!
//! Writes the enumerated tree as
//! `{ "functionalEvents": [{ name, label }], "paths": [{ steps: [{ event, state }], sequence }] }`.

use std::io::Write;

use log::debug;

use evtree_core::{event_tree::EventTree, grid::GridLayout};

use super::{Error, Exporter};

/// Serializes the [`EventTree`] record to a writer.
pub struct JsonExporter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonExporter<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for JsonExporter<W> {
    fn export(&mut self, tree: &EventTree, _grid: &GridLayout) -> Result<(), Error> {
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, tree)
        } else {
            serde_json::to_writer(&mut self.writer, tree)
        };
        result.map_err(|err| Error::Render(err.to_string()))?;
        writeln!(self.writer)?;

        debug!(pretty = self.pretty, sequences = tree.paths().len(); "JSON written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use evtree_core::event_tree::{FunctionalEvent, Sequence, StepRecord};

    use super::*;

    fn tree() -> EventTree {
        EventTree::new(
            vec![FunctionalEvent::new("FE1", "A")],
            vec![Sequence::new(vec![StepRecord::new("FE1", "Failure")], "SEQ-3")],
        )
    }

    #[test]
    fn test_compact_output() {
        let mut exporter = JsonExporter::new(Vec::new(), false);

        exporter.export(&tree(), &GridLayout::default()).unwrap();

        let output = String::from_utf8(exporter.into_inner()).unwrap();
        assert_eq!(
            output,
            concat!(
                r#"{"functionalEvents":[{"name":"FE1","label":"A"}],"#,
                r#""paths":[{"steps":[{"event":"FE1","state":"Failure"}],"sequence":"SEQ-3"}]}"#,
                "\n"
            )
        );
    }

    #[test]
    fn test_pretty_output_is_same_value() {
        let mut exporter = JsonExporter::new(Vec::new(), true);

        exporter.export(&tree(), &GridLayout::default()).unwrap();

        let output = exporter.into_inner();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["paths"][0]["sequence"], "SEQ-3");
        assert!(String::from_utf8(output).unwrap().contains("\n  "));
    }
}
