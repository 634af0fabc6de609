//! Source positions
//!
//! Every block and diagnostic carries a [`Range`]: the byte span in the source plus the
//! line:column of both ends. Lines and columns are zero-based; columns count bytes.
//! [`SourceLocation`] converts byte offsets to positions with a binary search over line starts.

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// A line and column in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A stretch of source: byte span plus start and end positions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }

    /// The smallest range covering all given ranges.
    pub fn bounding_box<'a, I>(mut ranges: I) -> Option<Range>
    where
        I: Iterator<Item = &'a Range>,
    {
        let first = ranges.next()?.clone();
        Some(ranges.fold(first, |acc, range| {
            let (span_start, start) = if range.start < acc.start {
                (range.span.start, range.start)
            } else {
                (acc.span.start, acc.start)
            };
            let (span_end, end) = if range.end > acc.end {
                (range.span.end, range.end)
            } else {
                (acc.span.end, acc.end)
            };
            Range::new(span_start..span_end, start, end)
        }))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Byte offset to position conversion for one source text
pub struct SourceLocation {
    line_starts: Vec<usize>,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(offset, _)| offset + 1),
        );
        Self { line_starts }
    }

    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i.saturating_sub(1));
        Position::new(line, byte_offset - self.line_starts[line])
    }

    pub fn range(&self, span: ByteRange<usize>) -> Range {
        let start = self.byte_to_position(span.start);
        let end = self.byte_to_position(span.end);
        Range::new(span, start, end)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(5, 10).to_string(), "5:10");
        let range = Range::new(0..0, Position::new(1, 0), Position::new(2, 5));
        assert_eq!(range.to_string(), "1:0..2:5");
    }

    #[test]
    fn test_byte_to_position_multiline() {
        let loc = SourceLocation::new("Hello\nworld\ntest");
        assert_eq!(loc.byte_to_position(0), Position::new(0, 0));
        assert_eq!(loc.byte_to_position(5), Position::new(0, 5));
        assert_eq!(loc.byte_to_position(6), Position::new(1, 0));
        assert_eq!(loc.byte_to_position(15), Position::new(2, 3));
        assert_eq!(loc.line_count(), 3);
    }

    #[test]
    fn test_range_spans_lines() {
        let loc = SourceLocation::new("Hello\nWorld\nTest");
        let range = loc.range(6..12);
        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.end, Position::new(2, 0));
    }

    #[test]
    fn test_bounding_box() {
        let ranges = [
            Range::new(2..5, Position::new(0, 2), Position::new(0, 5)),
            Range::new(10..20, Position::new(3, 0), Position::new(4, 3)),
        ];
        let bbox = Range::bounding_box(ranges.iter()).unwrap();
        assert_eq!(bbox.span, 2..20);
        assert_eq!(bbox.end, Position::new(4, 3));
        assert!(Range::bounding_box(std::iter::empty()).is_none());
    }
}
