//! Byte ranges into the source document.

use std::{fmt, ops::Range};

use roxmltree::{Node, TextPos};

/// A half-open byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Span covering only the start tag of an element.
    ///
    /// Labels on large elements read better when they point at the opening tag
    /// instead of underlining the entire subtree.
    pub(crate) fn of_start_tag(node: Node<'_, '_>, source: &str) -> Self {
        let range = node.range();
        let tag_end = source
            .get(range.clone())
            .and_then(start_tag_close)
            .map_or(range.end, |offset| range.start + offset + 1);
        Self::new(range.start..tag_end)
    }

    /// Convert a 1-based row/column position into a zero-length span.
    ///
    /// Columns count characters, not bytes. Positions past the end of a line
    /// or of the text are clamped.
    pub(crate) fn at_text_pos(source: &str, pos: TextPos) -> Self {
        let row = pos.row.max(1) as usize;
        let col = pos.col.max(1) as usize;

        let line_start = source
            .split_inclusive('\n')
            .take(row - 1)
            .map(str::len)
            .sum::<usize>();
        let line = source[line_start..].split('\n').next().unwrap_or_default();
        let offset = line
            .char_indices()
            .nth(col - 1)
            .map_or(line.len(), |(idx, _)| idx);

        let at = line_start + offset;
        Self::new(at..at)
    }
}

/// Offset of the `>` closing the start tag at the front of `text`.
///
/// A `>` inside a quoted attribute value does not close the tag.
fn start_tag_close(text: &str) -> Option<usize> {
    let mut quote = None;
    for (offset, ch) in text.char_indices() {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(open), _) if ch == open => quote = None,
            (None, '>') => return Some(offset),
            _ => {}
        }
    }
    None
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0..0)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_accessors() {
        let span = Span::new(4..10);

        assert_eq!(span.start(), 4);
        assert_eq!(span.end(), 10);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::default().is_empty());
    }

    #[test]
    fn test_span_union() {
        let span = Span::new(10..20).union(Span::new(5..12));

        assert_eq!(span, Span::new(5..20));
    }

    #[test]
    fn test_at_text_pos() {
        let source = "<a>\n  <b>\n</a>";

        assert_eq!(Span::at_text_pos(source, TextPos::new(1, 1)).start(), 0);
        assert_eq!(Span::at_text_pos(source, TextPos::new(2, 3)).start(), 6);
        assert_eq!(Span::at_text_pos(source, TextPos::new(3, 1)).start(), 10);
    }

    #[test]
    fn test_at_text_pos_clamps_past_end() {
        let source = "<a>";

        assert_eq!(Span::at_text_pos(source, TextPos::new(1, 40)).start(), 3);
        assert_eq!(Span::at_text_pos(source, TextPos::new(9, 1)).start(), 3);
    }

    #[test]
    fn test_of_start_tag() {
        let source = r#"<root><fork functional-event="FE1"><path/></fork></root>"#;
        let doc = roxmltree::Document::parse(source).unwrap();
        let fork = doc
            .descendants()
            .find(|n| n.has_tag_name("fork"))
            .unwrap();

        let span = Span::of_start_tag(fork, source);

        assert_eq!(&source[span.start()..span.end()], r#"<fork functional-event="FE1">"#);
        assert_eq!(span.start(), fork.range().start);
    }

    #[test]
    fn test_of_start_tag_skips_quoted_angle_brackets() {
        let source = r#"<root><path state="a>b" note='x>y'><sequence name="S"/></path></root>"#;
        let doc = roxmltree::Document::parse(source).unwrap();
        let path = doc
            .descendants()
            .find(|n| n.has_tag_name("path"))
            .unwrap();

        let span = Span::of_start_tag(path, source);

        assert_eq!(&source[span.start()..span.end()], r#"<path state="a>b" note='x>y'>"#);
    }
}
